use std::fmt::{Display, Formatter, Result as FmtResult};

use time::{Duration, PrimitiveDateTime};

use crate::{
    attribute_model,
    convert::{Date, Int, JsonList, Nested, Nullable, PreProcessInt, Str},
};

use super::{GameMode, ScoringType, TeamScore, TeamType};

attribute_model! {
    #[derive(Clone, Debug, PartialEq)]
    pub struct MatchMetadata {
        match_id: u32 = Int::new(),
        name: String = Str,
        start_time: PrimitiveDateTime = Date,
        end_time: Option<PrimitiveDateTime> = Nullable(Date),
    }
}

attribute_model! {
    /// One map played inside a multiplayer match.
    #[derive(Clone, Debug, PartialEq)]
    pub struct Game {
        game_id: u64 = Int::new(),
        start_time: PrimitiveDateTime = Date,
        end_time: PrimitiveDateTime = Date,
        beatmap_id: u32 = Int::new(),
        play_mode: GameMode = PreProcessInt::new(),
        match_type: String = Str,
        scoring_type: ScoringType = PreProcessInt::new(),
        team_type: TeamType = PreProcessInt::new(),
        mods: u32 = Int::new(),
        scores: Vec<TeamScore> = JsonList(Nested::new()),
    }
}

attribute_model! {
    #[derive(Clone, Debug, PartialEq)]
    pub struct Match {
        metadata: MatchMetadata = Nested::new() => "match",
        games: Vec<Game> = JsonList(Nested::new()),
    }
}

impl MatchMetadata {
    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }
}

impl Game {
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }
}

impl Display for MatchMetadata {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "MatchMetadata id={} name={} start_time={}",
            self.match_id, self.name, self.start_time
        )
    }
}
