//! Facade crate for the AWS regional services map.
//!
//! Answers which AWS services are offered in which regions, from either the
//! snapshot bundled with the crate or the live regional services table. This
//! crate re-exports the query types and dataset sources and adds a few
//! constructors for the common setups.
//!
//! ```
//! let map = aws_service_map::embedded();
//! assert!(map.is_service_in_region("lambda", "eu-west-1")?);
//! assert!(map.regions_for_service("secretsmanager")?.contains("us-east-1"));
//! # Ok::<(), aws_service_map::LoadError>(())
//! ```

#![forbid(unsafe_code)]

use thiserror::Error;

pub use aws_service_map_core::{
    Dataset, DatasetLoader, EntryError, IndexSummary, LoadError, LoadState, RawEntry,
    ServiceIndex, ServiceMap, derive_slug, slug_from_service_url,
};
pub use aws_service_map_data::{
    ConfigError, ConfiguredLoader, DatasetSource, EmbeddedDataset, HttpDatasetConfig,
    LoaderBuildError, ServiceMapConfig, UnknownSourceError, service_map,
};

#[cfg(feature = "remote")]
pub use aws_service_map_data::HttpDataset;

/// Service map whose source is chosen at runtime.
pub type AwsServiceMap = ServiceMap<ConfiguredLoader>;

/// Failures assembling an [`AwsServiceMap`] from the environment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError {
    /// An environment override held an invalid value.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The selected loader could not be constructed.
    #[error(transparent)]
    Loader(#[from] LoaderBuildError),
}

/// Map over the bundled snapshot; never touches the network.
#[must_use]
pub const fn embedded() -> ServiceMap<EmbeddedDataset> {
    ServiceMap::new(EmbeddedDataset::new())
}

/// Map configured from the `AWS_SERVICE_MAP_*` environment variables.
///
/// Without overrides this serves the bundled snapshot.
///
/// # Errors
///
/// Returns [`BuildError`] when an override is invalid or the selected loader
/// cannot be built.
pub fn from_env() -> Result<AwsServiceMap, BuildError> {
    let config = ServiceMapConfig::from_env()?;
    Ok(service_map(&config)?)
}
