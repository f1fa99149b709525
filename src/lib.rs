//! Typed client for the osu! v1 web API.
//!
//! Responses are decoded into [`serde_json::Value`] and then mapped onto the
//! models in [`model`] through their attribute schemas, see [`attribute`].
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! use osuapi::{model::GameMode, HyperTransport, OsuApi, UserLookup};
//!
//! let api = OsuApi::new("api key", HyperTransport::new()?);
//! let users = api.get_user(UserLookup::ByName("peppy".into()), GameMode::Osu).await?;
//!
//! for user in users {
//!     println!("{user}: {}pp, {} total hits", user.pp_raw, user.total_hits());
//! }
//! # Ok(()) }
//! ```

#![deny(nonstandard_style, rust_2018_idioms)]

#[macro_use]
extern crate tracing;

pub mod attribute;
pub mod client;
pub mod convert;
pub mod error;
pub mod model;

pub use self::{
    attribute::AttributeModel,
    client::{BeatmapsQuery, HyperTransport, OsuApi, ScoresQuery, Transport, UserLookup},
    error::{ConvertError, ModelError, OsuError},
};
