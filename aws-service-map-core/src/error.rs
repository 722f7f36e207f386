//! Errors raised while acquiring the regional services dataset.

use thiserror::Error;

/// Acquisition failures surfaced by [`crate::DatasetLoader::load`].
///
/// Variants carry owned strings rather than transport errors so a failed
/// [`crate::ServiceMap`] can hand the same error to every caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The request could not be sent or the connection failed.
    #[error("network error contacting {url}: {message}")]
    Network {
        /// Fully qualified request URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Fully qualified request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The server answered with a non-success status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Fully qualified request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Short error description.
        message: String,
    },
    /// The response body could not be read.
    #[error("failed to read response body from {url}: {message}")]
    Body {
        /// Fully qualified request URL.
        url: String,
        /// Read error description.
        message: String,
    },
    /// The document was not valid JSON or lacked the `prices` array.
    #[error("failed to decode dataset document: {message}")]
    Decode {
        /// Decoder error description.
        message: String,
    },
}
