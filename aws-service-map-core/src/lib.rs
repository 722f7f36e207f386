//! Core model for answering which AWS services run in which regions.
//!
//! AWS publishes service availability as a single JSON document whose
//! `prices` array holds one record per `token:region` pair. Older snapshots
//! use the service code as the token; newer ones use an opaque hash and carry
//! an attributes block whose `aws:serviceUrl` names the service. This crate
//! turns either shape, or a mixture, into a [`ServiceIndex`] and exposes the
//! queries through [`ServiceMap`], which loads its dataset lazily and exactly
//! once.
//!
//! Responsibilities:
//! - Decode dataset documents into [`RawEntry`] values.
//! - Derive canonical service slugs from raw entries.
//! - Build and query the normalized index.
//!
//! Boundaries:
//! - No I/O. Acquisition lives behind the [`DatasetLoader`] trait and is
//!   implemented by `aws-service-map-data`.
//!
//! # Examples
//!
//! ```
//! use aws_service_map_core::{Dataset, DatasetLoader, LoadError, ServiceMap};
//!
//! struct Inline;
//!
//! impl DatasetLoader for Inline {
//!     fn load(&self) -> Result<Dataset, LoadError> {
//!         Dataset::from_slice(br#"{"prices":[{"id":"ec2:eu-west-1"}]}"#)
//!     }
//! }
//!
//! let map = ServiceMap::new(Inline);
//! assert!(map.is_service_in_region("ec2", "eu-west-1")?);
//! # Ok::<(), LoadError>(())
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod dataset;
mod entry;
mod error;
mod index;
mod loader;
mod service_map;
mod slug;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use dataset::Dataset;
pub use entry::{EntryError, RawEntry};
pub use error::LoadError;
pub use index::{IndexSummary, ServiceIndex};
pub use loader::DatasetLoader;
pub use service_map::{LoadState, ServiceMap};
pub use slug::{derive_slug, slug_from_service_url};
