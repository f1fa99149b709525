use std::fmt::{Display, Formatter, Result as FmtResult};

pub static BASE_URL: &str = "https://osu.ppy.sh/api/";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    User,
    UserBest,
    UserRecent,
    Scores,
    Beatmaps,
    Match,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::User => "get_user",
            Self::UserBest => "get_user_best",
            Self::UserRecent => "get_user_recent",
            Self::Scores => "get_scores",
            Self::Beatmaps => "get_beatmaps",
            Self::Match => "get_match",
        }
    }
}

impl Display for Endpoint {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.path())
    }
}
