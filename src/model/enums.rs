use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::convert::IntEnum;

macro_rules! int_enum {
    ($(
        $(#[$meta:meta])*
        $name:ident($kind:literal) {
            $( $variant:ident = $code:literal => $display:literal, )*
        }
    )*) => {
        $(
            $(#[$meta])*
            #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
            pub enum $name {
                $( $variant = $code, )*
            }

            impl $name {
                pub const ALL: &'static [Self] = &[$( Self::$variant, )*];
            }

            impl IntEnum for $name {
                const KIND: &'static str = $kind;

                fn from_code(code: i64) -> Option<Self> {
                    match code {
                        $( $code => Some(Self::$variant), )*
                        _ => None,
                    }
                }

                fn code(&self) -> i64 {
                    *self as i64
                }
            }

            impl Display for $name {
                fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                    let name = match self {
                        $( Self::$variant => $display, )*
                    };

                    f.write_str(name)
                }
            }
        )*
    };
}

int_enum! {
    GameMode("game mode") {
        Osu = 0 => "osu!",
        Taiko = 1 => "osu!taiko",
        Catch = 2 => "osu!catch",
        Mania = 3 => "osu!mania",
    }

    /// Ranked status of a beatmap, `approved` in the API.
    BeatmapStatus("beatmap status") {
        Graveyard = -2 => "graveyard",
        Wip = -1 => "WIP",
        Pending = 0 => "pending",
        Ranked = 1 => "ranked",
        Approved = 2 => "approved",
        Qualified = 3 => "qualified",
    }

    // 8 is not assigned
    BeatmapGenre("beatmap genre") {
        Any = 0 => "any",
        Unspecified = 1 => "unspecified",
        VideoGame = 2 => "video game",
        Anime = 3 => "anime",
        Rock = 4 => "rock",
        Pop = 5 => "pop",
        Other = 6 => "other",
        Novelty = 7 => "novelty",
        HipHop = 9 => "hip hop",
        Electronic = 10 => "electronic",
    }

    BeatmapLanguage("beatmap language") {
        Any = 0 => "any",
        Other = 1 => "other",
        English = 2 => "english",
        Japanese = 3 => "japanese",
        Chinese = 4 => "chinese",
        Instrumental = 5 => "instrumental",
        Korean = 6 => "korean",
        French = 7 => "french",
        German = 8 => "german",
        Swedish = 9 => "swedish",
        Spanish = 10 => "spanish",
        Italian = 11 => "italian",
    }

    /// Win condition of a multiplayer game.
    ScoringType("scoring type") {
        Score = 0 => "score",
        Accuracy = 1 => "accuracy",
        Combo = 2 => "combo",
        ScoreV2 = 3 => "score v2",
    }

    /// Team setup of a multiplayer game.
    TeamType("team type") {
        HeadToHead = 0 => "head to head",
        TagCoop = 1 => "tag co-op",
        TeamVs = 2 => "team vs",
        TagTeamVs = 3 => "tag team vs",
    }
}

impl Default for GameMode {
    #[inline]
    fn default() -> Self {
        Self::Osu
    }
}
