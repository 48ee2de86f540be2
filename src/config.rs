// src/config.rs

use lazy_static::lazy_static;
use std::num::ParseIntError;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_MIN_SCAN_MS: u64 = 2000;

lazy_static! {
    /// Prefix shared by every environment variable this program reads.
    pub static ref ENV_PREFIX: String = env!("CARGO_CRATE_NAME").to_uppercase();
    pub static ref API_URL_ENV: String = format!("{}_API_URL", *ENV_PREFIX);
    pub static ref MIN_SCAN_ENV: String = format!("{}_MIN_SCAN_MS", *ENV_PREFIX);
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL ({value:?}): {source}")]
    InvalidUrl {
        var: String,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{var} must use http or https, got {scheme:?}")]
    UnsupportedScheme { var: String, scheme: String },

    #[error("{var} must be a whole number of milliseconds ({value:?}): {source}")]
    InvalidDuration {
        var: String,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Runtime settings, all overridable from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the scanning service; `/api/scan` is resolved against it.
    pub api_url: Url,
    /// How long the scanning screen stays up at minimum. Zero disables the hold.
    pub min_scanning_display: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = match lookup(API_URL_ENV.as_str()).filter(|v| !v.trim().is_empty()) {
            Some(raw) => parse_api_url(&raw)?,
            None => Url::parse(DEFAULT_API_URL).map_err(|source| ConfigError::InvalidUrl {
                var: API_URL_ENV.clone(),
                value: DEFAULT_API_URL.to_string(),
                source,
            })?,
        };

        let min_scan_ms = match lookup(MIN_SCAN_ENV.as_str()).filter(|v| !v.trim().is_empty()) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|source| ConfigError::InvalidDuration {
                var: MIN_SCAN_ENV.clone(),
                value: raw.clone(),
                source,
            })?,
            None => DEFAULT_MIN_SCAN_MS,
        };

        Ok(Self {
            api_url,
            min_scanning_display: Duration::from_millis(min_scan_ms),
        })
    }
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl {
        var: API_URL_ENV.clone(),
        value: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme {
            var: API_URL_ENV.clone(),
            scheme: other.to_string(),
        }),
    }
}
