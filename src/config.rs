use std::{env, sync::OnceLock};

use eyre::Result;
use hyper::Uri;
use osuapi::client::BASE_URL;

static CONFIG: OnceLock<Config> = OnceLock::new();

pub struct Config {
    pub api_key: Box<str>,
    pub api_url: Uri,
}

impl Config {
    pub fn get() -> &'static Self {
        CONFIG.get().expect("CONFIG not yet initialized")
    }
}

pub fn init() -> Result<()> {
    let api_url = match env::var("OSU_API_URL") {
        Ok(_) => env_var("OSU_API_URL")?,
        Err(_) => {
            debug!("missing env variable `OSU_API_URL`; using {BASE_URL}");

            Uri::from_static(BASE_URL)
        }
    };

    let config = Config {
        api_key: env_var("OSU_API_KEY")?,
        api_url,
    };

    CONFIG
        .set(config)
        .map_err(|_| eyre!("`Config::init` has already been called"))
}

trait EnvKind: Sized {
    const EXPECTED: &'static str;

    fn from_str(s: String) -> Result<Self, String>;
}

macro_rules! env_kind {
    ($($ty:ty: $arg:ident => $impl:block,)*) => {
        $(
            impl EnvKind for $ty {
                const EXPECTED: &'static str = stringify!($ty);

                fn from_str($arg: String) -> Result<Self, String> {
                    $impl
                }
            }
        )*
    };
}

env_kind! {
    Box<str>: s => {
        if s.trim().is_empty() {
            Err(s)
        } else {
            Ok(s.into_boxed_str())
        }
    },
    Uri: s => { s.parse().map_err(|_| s) },
}

fn env_var<T: EnvKind>(name: &'static str) -> Result<T> {
    let value = env::var(name).map_err(|_| eyre!("missing env variable `{name}`"))?;

    T::from_str(value).map_err(|value| {
        eyre!(
            "failed to parse env variable `{name}={value}`; expected {expected}",
            expected = T::EXPECTED
        )
    })
}
