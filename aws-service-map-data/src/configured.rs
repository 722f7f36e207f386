//! Runtime selection between dataset loaders.

use aws_service_map_core::{Dataset, DatasetLoader, LoadError, ServiceMap};
use log::info;

#[cfg(feature = "remote")]
use crate::HttpDataset;
use crate::{DatasetSource, EmbeddedDataset, HttpDatasetConfig, LoaderBuildError, ServiceMapConfig};

/// Loader chosen from a [`ServiceMapConfig`].
///
/// Each variant performs a single acquisition per load and never falls back
/// to the other source.
#[derive(Debug)]
pub enum ConfiguredLoader {
    /// Serve the bundled snapshot.
    Embedded(EmbeddedDataset),
    /// Download the live document.
    #[cfg(feature = "remote")]
    #[cfg_attr(docsrs, doc(cfg(feature = "remote")))]
    Remote(HttpDataset),
}

impl ConfiguredLoader {
    /// Build the loader `config` selects.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderBuildError`] when the HTTP client or runtime cannot be
    /// built, or when the download source is selected without the `remote`
    /// feature.
    pub fn from_config(config: &ServiceMapConfig) -> Result<Self, LoaderBuildError> {
        let loader = match config.source {
            DatasetSource::EmbeddedInPackage => Self::Embedded(EmbeddedDataset::new()),
            DatasetSource::DownloadFromAws => Self::remote(&config.http)?,
        };
        info!("regional services dataset source: {}", loader.source());
        Ok(loader)
    }

    /// Source this loader reads from.
    #[must_use]
    pub const fn source(&self) -> DatasetSource {
        match self {
            Self::Embedded(_) => DatasetSource::EmbeddedInPackage,
            #[cfg(feature = "remote")]
            Self::Remote(_) => DatasetSource::DownloadFromAws,
        }
    }

    #[cfg(feature = "remote")]
    fn remote(http: &HttpDatasetConfig) -> Result<Self, LoaderBuildError> {
        HttpDataset::with_config(http.clone()).map(Self::Remote)
    }

    #[cfg(not(feature = "remote"))]
    const fn remote(_http: &HttpDatasetConfig) -> Result<Self, LoaderBuildError> {
        Err(LoaderBuildError::RemoteDisabled)
    }
}

impl Default for ConfiguredLoader {
    fn default() -> Self {
        Self::Embedded(EmbeddedDataset::new())
    }
}

impl From<EmbeddedDataset> for ConfiguredLoader {
    fn from(loader: EmbeddedDataset) -> Self {
        Self::Embedded(loader)
    }
}

#[cfg(feature = "remote")]
impl From<HttpDataset> for ConfiguredLoader {
    fn from(loader: HttpDataset) -> Self {
        Self::Remote(loader)
    }
}

impl DatasetLoader for ConfiguredLoader {
    fn load(&self) -> Result<Dataset, LoadError> {
        match self {
            Self::Embedded(loader) => loader.load(),
            #[cfg(feature = "remote")]
            Self::Remote(loader) => loader.load(),
        }
    }
}

/// Unloaded [`ServiceMap`] over the loader `config` selects.
///
/// # Errors
///
/// Returns [`LoaderBuildError`] under the same conditions as
/// [`ConfiguredLoader::from_config`].
///
/// # Examples
///
/// ```
/// use aws_service_map_core::LoadState;
/// use aws_service_map_data::{ServiceMapConfig, service_map};
///
/// let map = service_map(&ServiceMapConfig::default())?;
/// assert_eq!(map.state(), LoadState::Unloaded);
/// assert!(map.all_regions()?.contains("eu-west-1"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn service_map(
    config: &ServiceMapConfig,
) -> Result<ServiceMap<ConfiguredLoader>, LoaderBuildError> {
    ConfiguredLoader::from_config(config).map(ServiceMap::new)
}
