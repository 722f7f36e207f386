//! Live download of the regional services document.
//!
//! [`HttpDataset`] implements the synchronous
//! [`aws_service_map_core::DatasetLoader`] trait by blocking on an async
//! `reqwest` request, so the core crate stays free of any async runtime.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use aws_service_map_core::ServiceMap;
//! use aws_service_map_data::{HttpDataset, HttpDatasetConfig};
//!
//! let config = HttpDatasetConfig::default()
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("inventory-audit/1.0");
//! let map = ServiceMap::new(HttpDataset::with_config(config)?);
//! println!("{} services", map.all_services()?.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod http;

pub use http::HttpDataset;
