//! Lazily loaded, cached service availability queries.

use std::collections::BTreeSet;
use std::time::Instant;

use log::{debug, info, warn};
use once_cell::sync::OnceCell;

use crate::{DatasetLoader, IndexSummary, LoadError, ServiceIndex};

/// Observable lifecycle of a [`ServiceMap`].
///
/// A map moves from `Unloaded` to `Ready` or `Failed` on its first query and
/// never leaves either terminal state. Construct a new map to reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No query has completed a load yet.
    Unloaded,
    /// The dataset loaded and the index is available.
    Ready,
    /// Loading failed; every query returns the recorded error.
    Failed,
}

/// Answers service availability queries over a dataset loaded on demand.
///
/// The first query runs [`DatasetLoader::load`] and builds a
/// [`ServiceIndex`]. Concurrent first queries block on the same
/// initialisation, so the loader runs at most once per map. A failed load is
/// remembered and returned by every later query.
///
/// # Examples
///
/// ```
/// use aws_service_map_core::{Dataset, DatasetLoader, LoadError, LoadState, ServiceMap};
///
/// struct Inline;
///
/// impl DatasetLoader for Inline {
///     fn load(&self) -> Result<Dataset, LoadError> {
///         Dataset::from_slice(br#"{"prices":[
///             {"id":"abc123:us-east-1","attributes":{"aws:serviceUrl":"https://aws.amazon.com/ec2/"}},
///             {"id":"ec2:eu-west-1"}
///         ]}"#)
///     }
/// }
///
/// let map = ServiceMap::new(Inline);
/// assert_eq!(map.state(), LoadState::Unloaded);
/// assert_eq!(map.regions_for_service("ec2")?.len(), 2);
/// assert_eq!(map.state(), LoadState::Ready);
/// # Ok::<(), LoadError>(())
/// ```
#[derive(Debug)]
pub struct ServiceMap<L> {
    loader: L,
    index: OnceCell<Result<ServiceIndex, LoadError>>,
}

impl<L> ServiceMap<L> {
    /// Wrap `loader` without loading anything.
    #[must_use]
    pub const fn new(loader: L) -> Self {
        Self {
            loader,
            index: OnceCell::new(),
        }
    }

    /// Borrow the underlying loader.
    #[must_use]
    pub const fn loader(&self) -> &L {
        &self.loader
    }

    /// Report the lifecycle state without triggering a load.
    ///
    /// A load in progress on another thread reports [`LoadState::Unloaded`].
    #[must_use]
    pub fn state(&self) -> LoadState {
        match self.index.get() {
            None => LoadState::Unloaded,
            Some(Ok(_)) => LoadState::Ready,
            Some(Err(_)) => LoadState::Failed,
        }
    }
}

impl<L: DatasetLoader> ServiceMap<L> {
    /// Borrow the index, loading the dataset on first use.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] recorded by the first load attempt.
    pub fn index(&self) -> Result<&ServiceIndex, LoadError> {
        self.index
            .get_or_init(|| self.build_index())
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Every observed region code.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] recorded by the first load attempt.
    pub fn all_regions(&self) -> Result<&BTreeSet<String>, LoadError> {
        Ok(self.index()?.all_regions())
    }

    /// Every derived service slug.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] recorded by the first load attempt.
    pub fn all_services(&self) -> Result<&BTreeSet<String>, LoadError> {
        Ok(self.index()?.all_services())
    }

    /// Regions offering `slug`; empty when the slug is unknown.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] recorded by the first load attempt.
    pub fn regions_for_service(&self, slug: &str) -> Result<&BTreeSet<String>, LoadError> {
        Ok(self.index()?.regions_for_service(slug))
    }

    /// Service slugs available in `region`; empty when the region is unknown.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] recorded by the first load attempt.
    pub fn services_for_region(&self, region: &str) -> Result<&BTreeSet<String>, LoadError> {
        Ok(self.index()?.services_for_region(region))
    }

    /// Whether `service` (a slug or raw token) is available in `region`.
    ///
    /// Entries that yield no slug are not indexed, so their raw tokens
    /// report `false`.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] recorded by the first load attempt.
    pub fn is_service_in_region(&self, service: &str, region: &str) -> Result<bool, LoadError> {
        Ok(self.index()?.is_service_in_region(service, region))
    }

    /// Human-readable name the dataset supplied for `slug`.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] recorded by the first load attempt.
    pub fn service_name(&self, slug: &str) -> Result<Option<&str>, LoadError> {
        Ok(self.index()?.service_name(slug))
    }

    /// Normalization counts for the loaded snapshot.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] recorded by the first load attempt.
    pub fn summary(&self) -> Result<&IndexSummary, LoadError> {
        Ok(self.index()?.summary())
    }

    fn build_index(&self) -> Result<ServiceIndex, LoadError> {
        let started = Instant::now();
        let dataset = self
            .loader
            .load()
            .inspect_err(|err| warn!("failed to load regional services dataset: {err}"))?;
        debug!(
            "loaded {} dataset entries in {:?}",
            dataset.len(),
            started.elapsed()
        );
        let index = ServiceIndex::build(&dataset);
        let summary = index.summary();
        info!(
            "indexed {} services across {} regions ({} records, {} malformed, {} without a slug)",
            summary.services,
            summary.regions,
            summary.entries_read,
            summary.skipped_malformed,
            summary.skipped_empty_slug
        );
        Ok(index)
    }
}
