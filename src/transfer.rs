//! File transfer: fetching installer artifacts over HTTP.
//!
//! The engine only needs one operation (fetch a URL into a destination
//! file), so the provider is a small trait with a blocking `reqwest`
//! implementation behind it. Tests substitute their own provider; the
//! engine never constructs one itself.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

/// Connect timeout for installer downloads.
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Read timeout; installers can be large, so this is generous.
const READ_TIMEOUT_SECS: u64 = 300;

/// Errors that can occur while fetching an installer artifact.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Network-level error (DNS, connection refused, TLS, mid-stream drop).
    #[error("network error downloading {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout downloading {url}")]
    Timeout { url: String },

    /// HTTP error response (4xx client errors, 5xx server errors).
    #[error("HTTP {status} downloading {url}")]
    HttpStatus { url: String, status: u16 },

    /// File system error writing the destination file.
    #[error("IO error writing to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TransferError {
    /// Creates a network error, promoting timeouts to [`Timeout`].
    ///
    /// [`Timeout`]: Self::Timeout
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: url.into() }
        } else {
            Self::Network {
                url: url.into(),
                source,
            }
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Fetches a remote artifact into a local file.
pub trait TransferProvider {
    /// Download `url` into `dest`, creating or overwriting the file.
    fn fetch(&self, url: &Url, dest: &Path) -> Result<(), TransferError>;
}

/// Blocking HTTP transfer built on `reqwest`.
///
/// Created once and reused for all downloads in a run to share the
/// connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransfer {
    client: reqwest::blocking::Client,
}

impl HttpTransfer {
    /// Creates a transfer provider with default timeouts.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static
    /// configuration, which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a transfer provider with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the supplied
    /// configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }
}

impl Default for HttpTransfer {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferProvider for HttpTransfer {
    fn fetch(&self, url: &Url, dest: &Path) -> Result<(), TransferError> {
        debug!(%url, dest = %dest.display(), "starting transfer");

        let mut response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| TransferError::network(url.as_str(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::http_status(url.as_str(), status.as_u16()));
        }

        let file = File::create(dest).map_err(|e| TransferError::io(dest, e))?;
        let mut writer = BufWriter::new(file);

        let copied = response
            .copy_to(&mut writer)
            .map_err(|e| TransferError::network(url.as_str(), e))
            .and_then(|bytes| {
                writer
                    .flush()
                    .map_err(|e| TransferError::io(dest, e))
                    .map(|()| bytes)
            });

        match copied {
            Ok(bytes) => {
                info!(%url, bytes, dest = %dest.display(), "transfer complete");
                Ok(())
            }
            Err(e) => {
                // Don't leave a truncated installer behind.
                warn!(%url, dest = %dest.display(), "removing partial file after failed transfer");
                let _ = fs::remove_file(dest);
                Err(e)
            }
        }
    }
}
