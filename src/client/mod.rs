use serde_json::Value;

use crate::{
    convert::{Converter, JsonList, Nested},
    error::OsuError,
    model::{Beatmap, GameMode, Match, Score, User},
};

pub use self::{
    endpoint::{Endpoint, BASE_URL},
    params::{BeatmapsQuery, Params, ScoresQuery, UserLookup},
    transport::{HttpError, HyperTransport, Transport},
};

mod endpoint;
mod params;
mod transport;

/// Client for the osu! v1 API.
pub struct OsuApi<T> {
    key: Box<str>,
    base_url: Box<str>,
    transport: T,
}

impl<T: Transport> OsuApi<T> {
    pub const DEFAULT_BEST_LIMIT: u32 = 50;
    pub const DEFAULT_RECENT_LIMIT: u32 = 10;

    pub fn new(key: impl Into<Box<str>>, transport: T) -> Self {
        Self {
            key: key.into(),
            base_url: BASE_URL.into(),
            transport,
        }
    }

    /// Send requests to another API root, e.g. a private server.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        let base_url = base_url.as_ref();

        self.base_url = if base_url.ends_with('/') {
            base_url.into()
        } else {
            format!("{base_url}/").into_boxed_str()
        };

        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Profile of a user. The API answers with a list of zero or one users.
    pub async fn get_user(
        &self,
        user: impl Into<UserLookup>,
        mode: GameMode,
    ) -> Result<Vec<User>, OsuError> {
        let mut params = Params::default();
        params.push_user(&user.into()).push_mode(mode);

        self.request(Endpoint::User, &params, JsonList(Nested::new()))
            .await
    }

    /// Top plays of a user.
    pub async fn get_user_best(
        &self,
        user: impl Into<UserLookup>,
        mode: GameMode,
        limit: u32,
    ) -> Result<Vec<Score>, OsuError> {
        let mut params = Params::default();
        params
            .push_user(&user.into())
            .push_mode(mode)
            .push("limit", limit);

        self.request(Endpoint::UserBest, &params, JsonList(Nested::new()))
            .await
    }

    /// Plays of a user within the last 24 hours.
    pub async fn get_user_recent(
        &self,
        user: impl Into<UserLookup>,
        mode: GameMode,
        limit: u32,
    ) -> Result<Vec<Score>, OsuError> {
        let mut params = Params::default();
        params
            .push_user(&user.into())
            .push_mode(mode)
            .push("limit", limit);

        self.request(Endpoint::UserRecent, &params, JsonList(Nested::new()))
            .await
    }

    /// Top scores on a beatmap.
    pub async fn get_scores(&self, query: &ScoresQuery) -> Result<Vec<Score>, OsuError> {
        self.request(Endpoint::Scores, &query.params(), JsonList(Nested::new()))
            .await
    }

    pub async fn get_beatmaps(&self, query: &BeatmapsQuery) -> Result<Vec<Beatmap>, OsuError> {
        let params = query.params()?;

        self.request(Endpoint::Beatmaps, &params, JsonList(Nested::new()))
            .await
    }

    /// A multiplayer match by the id shown in its match history,
    /// not the in-game lobby id.
    pub async fn get_match(&self, match_id: u32) -> Result<Match, OsuError> {
        let mut params = Params::default();
        params.push("mp", match_id);

        self.request(Endpoint::Match, &params, Nested::new()).await
    }

    async fn request<C: Converter>(
        &self,
        endpoint: Endpoint,
        params: &Params,
        converter: C,
    ) -> Result<C::Output, OsuError> {
        let query = params.encode()?;
        trace!("sending GET request to {endpoint} with `{query}`");

        let mut auth = Params::default();
        let key = auth.push("k", &self.key).encode()?;

        let url = if query.is_empty() {
            format!("{}{endpoint}?{key}", self.base_url)
        } else {
            format!("{}{endpoint}?{key}&{query}", self.base_url)
        };

        let bytes = self
            .transport
            .get(&url)
            .await
            .map_err(|source| OsuError::Transport {
                endpoint: endpoint.path(),
                source,
            })?;

        debug!("received {} bytes from {endpoint}", bytes.len());

        let value: Value = serde_json::from_slice(&bytes).map_err(|source| OsuError::Json {
            endpoint: endpoint.path(),
            source,
        })?;

        converter.convert(&value).map_err(OsuError::from)
    }
}
