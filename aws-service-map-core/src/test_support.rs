//! Deterministic loaders for unit and behaviour tests.
//!
//! [`StubLoader`] returns a canned document or error without any I/O, and
//! [`CountingLoader`] wraps another loader to record how often it ran.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{Dataset, DatasetLoader, LoadError};

/// Loader returning pre-configured results.
///
/// # Examples
///
/// ```
/// use aws_service_map_core::test_support::StubLoader;
/// use aws_service_map_core::DatasetLoader;
///
/// let loader = StubLoader::with_document(br#"{"prices":[{"id":"s3:us-east-1"}]}"#);
/// assert_eq!(loader.load()?.len(), 1);
/// # Ok::<(), aws_service_map_core::LoadError>(())
/// ```
#[derive(Debug, Clone)]
pub struct StubLoader {
    response: StubResponse,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Document(Vec<u8>),
    Dataset(Dataset),
    Error(LoadError),
}

impl StubLoader {
    /// Decode `document` on every load, surfacing decode errors.
    #[must_use]
    pub fn with_document(document: impl Into<Vec<u8>>) -> Self {
        Self {
            response: StubResponse::Document(document.into()),
        }
    }

    /// Return a copy of `dataset` on every load.
    #[must_use]
    pub const fn with_dataset(dataset: Dataset) -> Self {
        Self {
            response: StubResponse::Dataset(dataset),
        }
    }

    /// Fail every load with `error`.
    #[must_use]
    pub const fn with_error(error: LoadError) -> Self {
        Self {
            response: StubResponse::Error(error),
        }
    }
}

impl DatasetLoader for StubLoader {
    fn load(&self) -> Result<Dataset, LoadError> {
        match &self.response {
            StubResponse::Document(bytes) => Dataset::from_slice(bytes),
            StubResponse::Dataset(dataset) => Ok(dataset.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}

/// Loader wrapper that counts invocations.
#[derive(Debug, Default)]
pub struct CountingLoader<L> {
    inner: L,
    calls: AtomicUsize,
}

impl<L> CountingLoader<L> {
    /// Wrap `inner` with a zeroed counter.
    #[must_use]
    pub const fn new(inner: L) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of completed or in-flight calls to [`DatasetLoader::load`].
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<L: DatasetLoader> DatasetLoader for CountingLoader<L> {
    fn load(&self) -> Result<Dataset, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.load()
    }
}
