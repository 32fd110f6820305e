//! HTTP module containing HTTP client functionality.
//!
//! - [`client`] - HTTP client creation and middleware configuration
//!
//! # Examples
//!
//! ```rust
//! use rangefetch::http::{create_http_client, HttpClientConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpClientConfig {
//!     user_agent: Some("MyApp/1.0".to_string()),
//!     ..HttpClientConfig::default()
//! };
//!
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

pub mod client;

pub use client::{create_http_client, HttpClientConfig, DEFAULT_USER_AGENT};
