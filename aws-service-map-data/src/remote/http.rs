//! HTTP-backed [`DatasetLoader`].

use std::thread;
use std::time::Instant;

use aws_service_map_core::{Dataset, DatasetLoader, LoadError};
use log::debug;
use reqwest::Client;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use crate::{HttpDatasetConfig, LoaderBuildError};

/// Loader downloading the dataset document on every call to
/// [`DatasetLoader::load`].
///
/// The loader owns a single-threaded Tokio runtime reused across calls.
/// Each load issues exactly one GET request with no retry.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the owned runtime drives the request. Inside a
/// multi-threaded runtime the caller's handle is used via
/// [`tokio::task::block_in_place`]. Inside a `current_thread` runtime,
/// where blocking in place would panic, the request runs on the owned
/// runtime from a scoped helper thread.
pub struct HttpDataset {
    client: Client,
    config: HttpDatasetConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDataset")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpDataset {
    /// Loader for the public AWS endpoint with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new() -> Result<Self, LoaderBuildError> {
        Self::with_config(HttpDatasetConfig::default())
    }

    /// Loader with explicit settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpDatasetConfig) -> Result<Self, LoaderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(LoaderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(LoaderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Settings this loader was built with.
    #[must_use]
    pub const fn config(&self) -> &HttpDatasetConfig {
        &self.config
    }

    async fn fetch_async(&self) -> Result<Vec<u8>, LoadError> {
        let url = self.config.url.as_str();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;
        let body = response.bytes().await.map_err(|err| {
            if err.is_timeout() {
                self.convert_reqwest_error(&err, url)
            } else {
                LoadError::Body {
                    url: url.to_owned(),
                    message: err.to_string(),
                }
            }
        })?;
        Ok(body.to_vec())
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> LoadError {
        if error.is_timeout() {
            return LoadError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return LoadError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .map_or_else(|| error.to_string(), str::to_owned),
            };
        }

        LoadError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        let future = self.fetch_async();
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            Ok(_) => thread::scope(|scope| {
                match scope.spawn(|| self.runtime.block_on(future)).join() {
                    Ok(outcome) => outcome,
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }),
            Err(_) => self.runtime.block_on(future),
        }
    }
}

impl DatasetLoader for HttpDataset {
    fn load(&self) -> Result<Dataset, LoadError> {
        let started = Instant::now();
        let body = self.fetch()?;
        debug!(
            "downloaded {} bytes from {} in {:?}",
            body.len(),
            self.config.url,
            started.elapsed()
        );
        Dataset::from_slice(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StaticServer;
    use rstest::rstest;
    use std::time::Duration;

    fn dataset_for(url: &str) -> HttpDataset {
        HttpDataset::with_config(
            HttpDatasetConfig::new(url)
                .with_timeout(Duration::from_secs(2))
                .with_user_agent("service-map-tests/1.0"),
        )
        .expect("loader should build")
    }

    #[rstest]
    fn default_loader_targets_public_endpoint() {
        let loader = HttpDataset::new().expect("loader should build");
        assert_eq!(loader.config().url, crate::DEFAULT_URL);
    }

    #[rstest]
    fn downloads_and_decodes_document() {
        let server = StaticServer::start(200, r#"{"prices":[{"id":"ec2:us-east-1"}]}"#)
            .expect("server should start");
        let dataset = dataset_for(&server.url()).load().expect("load should succeed");
        assert_eq!(dataset.len(), 1);
        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].starts_with("GET /index.json HTTP/1.1"));
        assert!(
            requests[0]
                .to_ascii_lowercase()
                .contains("user-agent: service-map-tests/1.0")
        );
    }

    #[rstest]
    fn non_success_status_is_http_error() {
        let server = StaticServer::start(503, "down for maintenance").expect("server should start");
        let err = dataset_for(&server.url())
            .load()
            .expect_err("load should fail");
        assert_eq!(
            err,
            LoadError::Http {
                url: server.url(),
                status: 503,
                message: "Service Unavailable".to_owned(),
            }
        );
    }

    #[rstest]
    fn invalid_body_is_decode_error() {
        let server = StaticServer::start(200, "<html>").expect("server should start");
        let err = dataset_for(&server.url())
            .load()
            .expect_err("load should fail");
        assert!(matches!(err, LoadError::Decode { .. }), "got {err:?}");
    }

    #[rstest]
    fn refused_connection_is_network_error() {
        let url = StaticServer::unreachable_url().expect("port should be reserved");
        let err = dataset_for(&url).load().expect_err("load should fail");
        assert!(matches!(err, LoadError::Network { .. }), "got {err:?}");
    }

    #[rstest]
    fn silent_server_times_out() {
        let server = StaticServer::stalled().expect("server should start");
        let loader = HttpDataset::with_config(
            HttpDatasetConfig::new(server.url()).with_timeout(Duration::from_secs(1)),
        )
        .expect("loader should build");
        let err = loader.load().expect_err("load should time out");
        assert_eq!(
            err,
            LoadError::Timeout {
                url: server.url(),
                timeout_secs: 1,
            }
        );
    }

    #[rstest]
    fn loads_inside_multi_thread_runtime() {
        let server = StaticServer::start(200, r#"{"prices":[{"id":"s3:eu-west-1"}]}"#)
            .expect("server should start");
        let loader = dataset_for(&server.url());
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("runtime should build");
        let dataset = runtime
            .block_on(async { loader.load() })
            .expect("load should succeed");
        assert_eq!(dataset.len(), 1);
    }

    #[rstest]
    fn loads_inside_current_thread_runtime() {
        let server = StaticServer::start(200, r#"{"prices":[{"id":"s3:eu-west-1"}]}"#)
            .expect("server should start");
        let loader = dataset_for(&server.url());
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime should build");
        let dataset = runtime
            .block_on(async { loader.load() })
            .expect("load should succeed");
        assert_eq!(dataset.len(), 1);
    }
}
