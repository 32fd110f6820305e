//! Transfer configuration and the process-wide default.
//!
//! A [`Config`] carries the HTTP client a [`Download`](super::Download) issues
//! its request with. Callers should pass one explicitly through
//! [`DownloadOptions::config`](super::DownloadOptions::config); when they
//! don't, the job snapshots the process-wide default at construction time.
//!
//! # Examples
//!
//! ```rust
//! use rangefetch::{Config, HttpClientConfig};
//! use std::time::Duration;
//!
//! # fn example() -> rangefetch::Result<()> {
//! let config = Config::from_http_config(HttpClientConfig {
//!     timeout: Some(Duration::from_secs(300)),
//!     ..HttpClientConfig::default()
//! })?;
//!
//! // Jobs created from now on without an explicit config use this one.
//! Config::set_default_config(config);
//! # Ok(())
//! # }
//! ```

use crate::error::{Error, Result};
use crate::http::{create_http_client, HttpClientConfig};

use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The default is built lazily so that merely linking the crate never builds
/// an HTTP client.
static DEFAULT_CONFIG: Mutex<Option<Config>> = Mutex::new(None);

/// HTTP client behavior used by a download.
///
/// Cloning is cheap and yields an independent value: replacing the process
/// default never affects a job holding an earlier snapshot.
#[derive(Clone)]
pub struct Config {
    client: ClientWithMiddleware,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config").finish_non_exhaustive()
    }
}

impl Config {
    /// Wraps an already configured client.
    pub fn new(client: ClientWithMiddleware) -> Self {
        Self { client }
    }

    /// Builds the client described by `http_config`.
    pub fn from_http_config(http_config: HttpClientConfig) -> Result<Self> {
        let client = create_http_client(http_config)
            .map_err(|e| Error::Internal(format!("cannot build the HTTP client: {}", e)))?;
        Ok(Self::new(client))
    }

    /// The client requests are sent with.
    pub fn client(&self) -> &ClientWithMiddleware {
        &self.client
    }

    /// Builds the client described by [`HttpClientConfig::default`].
    pub fn stock() -> Result<Self> {
        Self::from_http_config(HttpClientConfig::default())
    }

    /// Returns a copy of the process-wide default configuration.
    ///
    /// The first call builds [`Config::stock`] unless a default was set
    /// before; the lock is not held while the client is built.
    pub fn default_config() -> Result<Config> {
        if let Some(config) = lock_default().as_ref() {
            return Ok(config.clone());
        }

        let stock = Self::stock()?;
        Ok(lock_default().get_or_insert(stock).clone())
    }

    /// Replaces the process-wide default configuration.
    ///
    /// Downloads constructed before this call keep the configuration they
    /// started with.
    pub fn set_default_config(config: Config) {
        *lock_default() = Some(config);
    }
}

fn lock_default() -> MutexGuard<'static, Option<Config>> {
    DEFAULT_CONFIG.lock().unwrap_or_else(PoisonError::into_inner)
}
