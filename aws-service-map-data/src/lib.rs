//! Dataset sources for the AWS regional services map.
//!
//! [`EmbeddedDataset`] serves the snapshot compiled into this crate and
//! performs no I/O. With the `remote` feature (on by default),
//! [`HttpDataset`] downloads the live document from the AWS regional
//! services table. [`ConfiguredLoader`] picks between them at runtime from a
//! [`ServiceMapConfig`].
//!
//! ```
//! use aws_service_map_data::{ConfiguredLoader, DatasetSource, ServiceMapConfig};
//! use aws_service_map_core::ServiceMap;
//!
//! let config = ServiceMapConfig::default().with_source(DatasetSource::EmbeddedInPackage);
//! let map = ServiceMap::new(ConfiguredLoader::from_config(&config)?);
//! assert!(map.is_service_in_region("ec2", "us-east-1")?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod configured;
mod embedded;
mod error;
#[cfg(feature = "remote")]
#[cfg_attr(docsrs, doc(cfg(feature = "remote")))]
pub mod remote;
mod source;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use config::{
    ConfigError, DEFAULT_TIMEOUT_SECS, DEFAULT_URL, DEFAULT_USER_AGENT, ENV_SOURCE,
    ENV_TIMEOUT_SECS, ENV_URL, HttpDatasetConfig, ServiceMapConfig,
};
pub use configured::{ConfiguredLoader, service_map};
pub use embedded::EmbeddedDataset;
pub use error::LoaderBuildError;
#[cfg(feature = "remote")]
pub use remote::HttpDataset;
pub use source::{DatasetSource, UnknownSourceError};
