//! Dataset acquisition seam.

use std::sync::Arc;

use crate::{Dataset, LoadError};

/// Obtain and decode the regional services dataset.
///
/// Implementations perform at most one acquisition per call and never retry
/// or fall back to another source. [`crate::ServiceMap`] calls `load` at most
/// once over its lifetime.
///
/// # Examples
///
/// ```rust
/// use aws_service_map_core::{Dataset, DatasetLoader, LoadError, RawEntry};
///
/// struct Fixed;
///
/// impl DatasetLoader for Fixed {
///     fn load(&self) -> Result<Dataset, LoadError> {
///         Ok(Dataset::new(vec![RawEntry::plain("s3", "us-east-1")]))
///     }
/// }
///
/// let dataset = Fixed.load()?;
/// assert_eq!(dataset.len(), 1);
/// # Ok::<(), LoadError>(())
/// ```
pub trait DatasetLoader {
    /// Acquire the dataset and decode it into raw entries.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when acquisition fails or the document cannot be
    /// decoded.
    fn load(&self) -> Result<Dataset, LoadError>;
}

impl<L: DatasetLoader + ?Sized> DatasetLoader for &L {
    fn load(&self) -> Result<Dataset, LoadError> {
        (**self).load()
    }
}

impl<L: DatasetLoader + ?Sized> DatasetLoader for Box<L> {
    fn load(&self) -> Result<Dataset, LoadError> {
        (**self).load()
    }
}

impl<L: DatasetLoader + ?Sized> DatasetLoader for Arc<L> {
    fn load(&self) -> Result<Dataset, LoadError> {
        (**self).load()
    }
}
