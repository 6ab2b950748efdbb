//! Configuration loaded from environment variables.
//!
//! Every key has a default so a bare environment still yields a usable
//! config. Unparseable values fall back to the default rather than failing.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_REFERENCE_WIDTH: u32 = 1920;
const DEFAULT_REFERENCE_HEIGHT: u32 = 1080;

/// Host settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the presentation API, without a trailing slash.
    pub api_base_url: String,
    /// Reference frame width recorded in saved annotation documents.
    pub reference_width: u32,
    /// Reference frame height recorded in saved annotation documents.
    pub reference_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            reference_width: DEFAULT_REFERENCE_WIDTH,
            reference_height: DEFAULT_REFERENCE_HEIGHT,
        }
    }
}

impl Config {
    /// Read `SLIDEMARK_API_BASE_URL`, `SLIDEMARK_REFERENCE_WIDTH` and
    /// `SLIDEMARK_REFERENCE_HEIGHT`.
    #[must_use]
    pub fn from_env() -> Self {
        let api_base_url = std::env::var("SLIDEMARK_API_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_owned())
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        Self {
            api_base_url,
            reference_width: env_parse("SLIDEMARK_REFERENCE_WIDTH", DEFAULT_REFERENCE_WIDTH),
            reference_height: env_parse("SLIDEMARK_REFERENCE_HEIGHT", DEFAULT_REFERENCE_HEIGHT),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}
