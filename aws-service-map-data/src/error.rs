//! Errors raised while constructing dataset loaders.

use thiserror::Error;

/// Failures building a [`crate::ConfiguredLoader`] or [`crate::HttpDataset`].
///
/// These surface from constructors only; query-time failures are
/// [`aws_service_map_core::LoadError`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoaderBuildError {
    /// Failed to build the HTTP client.
    #[cfg(feature = "remote")]
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[cfg(feature = "remote")]
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The download source was selected but the `remote` feature is off.
    #[error("downloading the dataset requires the `remote` feature")]
    RemoteDisabled,
}
