use std::fmt::Display;

use serde::{ser::SerializeMap, Serialize, Serializer};
use time::PrimitiveDateTime;

use crate::{
    convert::{format_date, IntEnum},
    model::{GameMode, Mods},
};

/// How a user is identified in a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserLookup {
    ById(u32),
    ByName(String),
}

impl UserLookup {
    fn value(&self) -> String {
        match self {
            Self::ById(user_id) => user_id.to_string(),
            Self::ByName(name) => name.clone(),
        }
    }

    /// The `type` parameter telling the API how to read `u`.
    fn kind(&self) -> &'static str {
        match self {
            Self::ById(_) => "id",
            Self::ByName(_) => "string",
        }
    }
}

impl From<u32> for UserLookup {
    #[inline]
    fn from(user_id: u32) -> Self {
        Self::ById(user_id)
    }
}

impl From<&str> for UserLookup {
    #[inline]
    fn from(name: &str) -> Self {
        Self::ByName(name.to_owned())
    }
}

impl From<String> for UserLookup {
    #[inline]
    fn from(name: String) -> Self {
        Self::ByName(name)
    }
}

/// Ordered query parameters of one request, without the API key.
#[derive(Debug, Default)]
pub struct Params {
    pairs: Vec<(&'static str, String)>,
}

impl Params {
    pub fn push(&mut self, key: &'static str, value: impl Display) -> &mut Self {
        self.pairs.push((key, value.to_string()));

        self
    }

    /// Absent values are not sent at all.
    pub fn push_opt(&mut self, key: &'static str, value: Option<impl Display>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }

        self
    }

    pub fn push_user(&mut self, user: &UserLookup) -> &mut Self {
        self.push("u", user.value()).push("type", user.kind())
    }

    pub fn push_mode(&mut self, mode: GameMode) -> &mut Self {
        self.push("m", mode.code())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encode as `application/x-www-form-urlencoded` query string.
    pub fn encode(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(self)
    }
}

impl Serialize for Params {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut s = s.serialize_map(Some(self.pairs.len()))?;

        for (key, value) in self.pairs.iter() {
            s.serialize_entry(key, value)?;
        }

        s.end()
    }
}

/// Top scores of a beatmap.
#[derive(Clone, Debug)]
pub struct ScoresQuery {
    pub beatmap_id: u32,
    pub user: Option<UserLookup>,
    pub mode: GameMode,
    pub mods: Option<Mods>,
    pub limit: u32,
}

impl ScoresQuery {
    pub const DEFAULT_LIMIT: u32 = 50;

    pub fn new(beatmap_id: u32) -> Self {
        Self {
            beatmap_id,
            user: None,
            mode: GameMode::Osu,
            mods: None,
            limit: Self::DEFAULT_LIMIT,
        }
    }

    /// Only scores of this user.
    pub fn user(mut self, user: impl Into<UserLookup>) -> Self {
        self.user = Some(user.into());

        self
    }

    pub fn mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;

        self
    }

    /// Only scores with exactly these mods.
    pub fn mods(mut self, mods: Mods) -> Self {
        self.mods = Some(mods);

        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;

        self
    }

    pub(super) fn params(&self) -> Params {
        let mut params = Params::default();
        params.push("b", self.beatmap_id);

        if let Some(ref user) = self.user {
            params.push_user(user);
        }

        params
            .push_mode(self.mode)
            .push_opt("mods", self.mods.map(Mods::bits))
            .push("limit", self.limit);

        params
    }
}

/// Beatmap search.
///
/// `mode` defaults to `None`, which omits `m` so that maps of every mode are
/// returned instead of only osu!standard maps. Set it to `GameMode::Osu` to
/// restrict the search to `m=0`.
#[derive(Clone, Debug)]
pub struct BeatmapsQuery {
    pub since: Option<PrimitiveDateTime>,
    pub beatmapset_id: Option<u32>,
    pub beatmap_id: Option<u32>,
    pub user: Option<UserLookup>,
    pub mode: Option<GameMode>,
    pub include_converted: bool,
    pub hash: Option<String>,
    pub limit: u32,
}

impl Default for BeatmapsQuery {
    fn default() -> Self {
        Self {
            since: None,
            beatmapset_id: None,
            beatmap_id: None,
            user: None,
            mode: None,
            include_converted: false,
            hash: None,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

impl BeatmapsQuery {
    pub const DEFAULT_LIMIT: u32 = 500;

    /// Only maps ranked after this date.
    pub fn since(mut self, since: PrimitiveDateTime) -> Self {
        self.since = Some(since);

        self
    }

    pub fn beatmapset(mut self, beatmapset_id: u32) -> Self {
        self.beatmapset_id = Some(beatmapset_id);

        self
    }

    pub fn beatmap(mut self, beatmap_id: u32) -> Self {
        self.beatmap_id = Some(beatmap_id);

        self
    }

    /// Only maps created by this user.
    pub fn user(mut self, user: impl Into<UserLookup>) -> Self {
        self.user = Some(user.into());

        self
    }

    pub fn mode(mut self, mode: GameMode) -> Self {
        self.mode = Some(mode);

        self
    }

    pub fn include_converted(mut self, include_converted: bool) -> Self {
        self.include_converted = include_converted;

        self
    }

    pub fn hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());

        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;

        self
    }

    pub(super) fn params(&self) -> Result<Params, time::error::Format> {
        let since = self.since.map(format_date).transpose()?;

        let mut params = Params::default();

        params
            .push_opt("s", self.beatmapset_id)
            .push_opt("b", self.beatmap_id);

        if let Some(ref user) = self.user {
            params.push_user(user);
        }

        params
            .push_opt("since", since)
            .push_opt("m", self.mode.map(|mode| mode.code()))
            .push("a", self.include_converted as u8)
            .push_opt("h", self.hash.as_deref())
            .push("limit", self.limit);

        Ok(params)
    }
}
