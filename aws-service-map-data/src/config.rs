//! Loader configuration with environment overrides.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::DatasetSource;

/// Location of the live regional services document.
pub const DEFAULT_URL: &str = "https://api.regional-table.region-services.aws.a2z.com/index.json";

/// Default user agent for dataset downloads.
pub const DEFAULT_USER_AGENT: &str = concat!("aws-service-map/", env!("CARGO_PKG_VERSION"));

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable selecting the [`DatasetSource`].
pub const ENV_SOURCE: &str = "AWS_SERVICE_MAP_SOURCE";

/// Environment variable overriding [`HttpDatasetConfig::url`].
pub const ENV_URL: &str = "AWS_SERVICE_MAP_URL";

/// Environment variable overriding [`HttpDatasetConfig::timeout`], in seconds.
pub const ENV_TIMEOUT_SECS: &str = "AWS_SERVICE_MAP_TIMEOUT_SECS";

/// Invalid values found while reading configuration overrides.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The timeout was not a positive whole number of seconds.
    #[error("invalid {key} value `{value}`: expected a positive number of seconds")]
    InvalidTimeout {
        /// Variable that carried the value.
        key: &'static str,
        /// The rejected input.
        value: String,
    },
}

/// Settings for downloading the dataset over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpDatasetConfig {
    /// Document URL.
    pub url: String,
    /// Connect and total request timeout.
    #[serde(rename = "timeout_secs", with = "timeout_secs")]
    pub timeout: Duration,
    /// User agent sent with the request.
    pub user_agent: String,
}

impl Default for HttpDatasetConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpDatasetConfig {
    /// Default settings pointed at `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Complete loader configuration.
///
/// # Examples
///
/// ```
/// use aws_service_map_data::{DatasetSource, ServiceMapConfig};
///
/// let config: ServiceMapConfig = serde_json::from_str(
///     r#"{"source":"download-from-aws","http":{"timeout_secs":5}}"#,
/// )?;
/// assert_eq!(config.source, DatasetSource::DownloadFromAws);
/// assert_eq!(config.http.timeout.as_secs(), 5);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceMapConfig {
    /// Where the dataset comes from.
    pub source: DatasetSource,
    /// Download settings, used only by [`DatasetSource::DownloadFromAws`].
    pub http: HttpDatasetConfig,
}

impl ServiceMapConfig {
    /// Select the dataset source.
    #[must_use]
    pub const fn with_source(mut self, source: DatasetSource) -> Self {
        self.source = source;
        self
    }

    /// Replace the download settings.
    #[must_use]
    pub fn with_http(mut self, http: HttpDatasetConfig) -> Self {
        self.http = http;
        self
    }

    /// Defaults overridden by the `AWS_SERVICE_MAP_*` environment variables.
    ///
    /// An unknown source name is logged and replaced by the default source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] when the timeout override is
    /// not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by values returned from `lookup`.
    ///
    /// `lookup` receives [`ENV_SOURCE`], [`ENV_URL`] and
    /// [`ENV_TIMEOUT_SECS`]. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] when the timeout override is
    /// not a positive integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();
        if let Some(source) = read(ENV_SOURCE) {
            config.source = DatasetSource::parse_or_default(&source);
        }
        if let Some(url) = read(ENV_URL) {
            config.http.url = url.trim().to_owned();
        }
        if let Some(raw) = read(ENV_TIMEOUT_SECS) {
            config.http.timeout = parse_timeout(&raw)?;
        }
        Ok(config)
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            key: ENV_TIMEOUT_SECS,
            value: raw.to_owned(),
        }),
    }
}

mod timeout_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(timeout: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(timeout.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
