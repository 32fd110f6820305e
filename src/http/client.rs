//! HTTP client setup and middleware configuration.
//!
//! This module turns a declarative [`HttpClientConfig`] into the
//! `ClientWithMiddleware` a [`Config`](crate::Config) carries. Every client is
//! wrapped with the tracing middleware; no retry middleware is installed,
//! retrying a failed download is left to the caller.
//!
//! # Examples
//!
//! ```rust
//! use rangefetch::http::{create_http_client, HttpClientConfig};
//! use reqwest::header::{HeaderMap, ACCEPT};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut headers = HeaderMap::new();
//! headers.insert(ACCEPT, "*/*".parse()?);
//!
//! let config = HttpClientConfig {
//!     headers: Some(headers),
//!     timeout: Some(Duration::from_secs(600)),
//!     ..HttpClientConfig::default()
//! };
//!
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

use reqwest::{header::HeaderMap, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use std::time::Duration;

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configuration for HTTP client setup.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
    /// User agent, [`DEFAULT_USER_AGENT`] when `None`.
    pub user_agent: Option<String>,
    /// Deadline for a whole request, body included.
    ///
    /// This is the only way to bound a download: the engine has no
    /// cancellation token of its own.
    pub timeout: Option<Duration>,
    /// Deadline for establishing the connection.
    pub connect_timeout: Option<Duration>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            headers: None,
            user_agent: None,
            timeout: None,
            connect_timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// Creates an HTTP client with middleware configuration.
///
/// The inner reqwest client gets the proxy, default headers, user agent and
/// timeouts from `config`, then it is wrapped with [`TracingMiddleware`].
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let mut inner_client_builder = reqwest::Client::builder().user_agent(
        config
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
    );

    if let Some(proxy) = config.proxy {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }

    if let Some(headers) = config.headers {
        inner_client_builder = inner_client_builder.default_headers(headers);
    }

    if let Some(timeout) = config.timeout {
        inner_client_builder = inner_client_builder.timeout(timeout);
    }

    if let Some(connect_timeout) = config.connect_timeout {
        inner_client_builder = inner_client_builder.connect_timeout(connect_timeout);
    }

    let inner_client = inner_client_builder.build()?;

    let client = ClientBuilder::new(inner_client)
        // Trace HTTP requests. See the tracing crate to make use of these traces.
        .with(TracingMiddleware::default())
        .build();

    Ok(client)
}
