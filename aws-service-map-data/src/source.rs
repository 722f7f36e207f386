//! Selection between the bundled snapshot and the live download.

use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a [`crate::ConfiguredLoader`] obtains the dataset.
///
/// Deserialization is lenient: an unrecognized value logs a warning and
/// selects [`DatasetSource::EmbeddedInPackage`].
///
/// # Examples
///
/// ```
/// use aws_service_map_data::DatasetSource;
///
/// assert_eq!("download-from-aws".parse(), Ok(DatasetSource::DownloadFromAws));
/// assert_eq!("DOWNLOAD_FROM_AWS".parse(), Ok(DatasetSource::DownloadFromAws));
/// assert_eq!(DatasetSource::parse_or_default("bogus"), DatasetSource::EmbeddedInPackage);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum DatasetSource {
    /// Serve the snapshot compiled into the crate.
    #[default]
    EmbeddedInPackage,
    /// Download the live document from the AWS regional services table.
    DownloadFromAws,
}

/// A source name matched none of [`DatasetSource::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dataset source `{value}`; expected one of: embedded-in-package, download-from-aws")]
pub struct UnknownSourceError {
    /// The rejected input.
    pub value: String,
}

impl DatasetSource {
    /// Every recognized source, default first.
    pub const ALL: [Self; 2] = [Self::EmbeddedInPackage, Self::DownloadFromAws];

    /// Canonical kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmbeddedInPackage => "embedded-in-package",
            Self::DownloadFromAws => "download-from-aws",
        }
    }

    /// Parse `value`, falling back to the default for unset or unknown input.
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        if value.trim().is_empty() {
            return Self::default();
        }
        value.parse().unwrap_or_else(|err: UnknownSourceError| {
            warn!("{err}; using {}", Self::default());
            Self::default()
        })
    }
}

impl FromStr for DatasetSource {
    type Err = UnknownSourceError;

    /// Accepts kebab-case and upper-snake names in any case, plus the short
    /// aliases `embedded` and `remote`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        match normalized.as_str() {
            "embedded-in-package" | "embedded" => Ok(Self::EmbeddedInPackage),
            "download-from-aws" | "remote" => Ok(Self::DownloadFromAws),
            _ => Err(UnknownSourceError {
                value: value.to_owned(),
            }),
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for DatasetSource {
    fn from(value: String) -> Self {
        Self::parse_or_default(&value)
    }
}

impl From<DatasetSource> for &'static str {
    fn from(source: DatasetSource) -> Self {
        source.as_str()
    }
}
