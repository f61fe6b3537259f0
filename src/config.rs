use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

pub const API_URL_VAR: &str = "POPCORN_API_URL";
pub const STORE_DIR_VAR: &str = "POPCORN_STORE_DIR";
pub const SUBMIT_TIMEOUT_VAR: &str = "POPCORN_SUBMIT_TIMEOUT_SECS";

#[derive(Debug, Error)]
#[error("invalid {key} value '{value}': {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend that `/api` requests are forwarded to.
    pub api_url: String,
    /// Directory holding the draft and session documents.
    pub store_dir: PathBuf,
    /// Upper bound on a payment confirmation round trip.
    pub submit_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup, falling back to defaults for
    /// missing keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: try_load(&lookup, API_URL_VAR, "http://localhost:5000")?,
            store_dir: try_load(&lookup, STORE_DIR_VAR, ".popcorn")?,
            submit_timeout: Duration::from_secs(try_load(&lookup, SUBMIT_TIMEOUT_VAR, "30")?),
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    value.parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError {
            key,
            reason: e.to_string(),
            value,
        }
    })
}
