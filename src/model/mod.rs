pub use self::{
    beatmap::Beatmap,
    enums::{BeatmapGenre, BeatmapLanguage, BeatmapStatus, GameMode, ScoringType, TeamType},
    matches::{Game, Match, MatchMetadata},
    mods::Mods,
    score::{Score, TeamScore},
    user::User,
};

mod beatmap;
mod enums;
mod matches;
mod mods;
mod score;
mod user;
