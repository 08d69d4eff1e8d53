//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::feed::DEFAULT_FEED_URL;

/// Default interval between price-list refreshes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Errors in environment configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("invalid {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuration for the server binary.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// TravelPrices endpoint (`COSMOS_FEED_URL`).
    pub feed_url: String,

    /// Request timeout for the feed (`COSMOS_FEED_TIMEOUT_SECS`).
    pub feed_timeout: Duration,

    /// JSON file of canned price lists used instead of the live feed
    /// (`COSMOS_MOCK_FEED`).
    pub mock_feed_path: Option<PathBuf>,

    /// Directory holding persisted data (`COSMOS_DATA_DIR`).
    pub data_dir: PathBuf,

    /// Interval between refreshes (`COSMOS_REFRESH_SECS`).
    pub refresh_interval: Duration,

    /// Address to listen on (`COSMOS_BIND_ADDR`).
    pub bind_addr: SocketAddr,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            feed_timeout: Duration::from_secs(30),
            mock_feed_path: None,
            data_dir: PathBuf::from("data"),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults for
    /// unset or blank variables.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get("COSMOS_FEED_URL") {
            config.feed_url = url.trim().to_string();
        }
        if let Some(value) = get("COSMOS_FEED_TIMEOUT_SECS") {
            config.feed_timeout = parse_secs("COSMOS_FEED_TIMEOUT_SECS", &value)?;
        }
        if let Some(path) = get("COSMOS_MOCK_FEED") {
            config.mock_feed_path = Some(PathBuf::from(path.trim()));
        }
        if let Some(dir) = get("COSMOS_DATA_DIR") {
            config.data_dir = PathBuf::from(dir.trim());
        }
        if let Some(value) = get("COSMOS_REFRESH_SECS") {
            config.refresh_interval = parse_secs("COSMOS_REFRESH_SECS", &value)?;
        }
        if let Some(value) = get("COSMOS_BIND_ADDR") {
            config.bind_addr = value.trim().parse().map_err(|e: std::net::AddrParseError| {
                ConfigError::Invalid {
                    var: "COSMOS_BIND_ADDR",
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        Ok(config)
    }
}

/// Parse a positive number of seconds.
fn parse_secs(var: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let secs: u64 = value
        .trim()
        .parse()
        .map_err(|_| invalid("expected a whole number of seconds"))?;
    if secs == 0 {
        return Err(invalid("must be greater than zero"));
    }

    Ok(Duration::from_secs(secs))
}
