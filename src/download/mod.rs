//! Download module containing the resumable download engine.
//!
//! - [`download`] - The [`Download`] job: probing, transfer and polling
//! - [`resume`] - Resume negotiation and lifecycle states
//! - [`options`] - Options accepted when constructing a job
//! - [`config`] - Transfer configuration and its process-wide default
//!
//! # Examples
//!
//! ## Resuming a partial file
//!
//! ```rust,no_run
//! use rangefetch::{Download, ResumeState};
//!
//! # async fn example() -> rangefetch::Result<()> {
//! let mut download = Download::new("index.json", "https://example.com/index.json").await?;
//! match download.state() {
//!     ResumeState::Resuming { offset } => println!("resuming after {} bytes", offset),
//!     ResumeState::Restarting { discarded } => println!("server refused to resume, dropping {} bytes", discarded),
//!     ResumeState::Starting => println!("starting from scratch"),
//! }
//! download.run().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Forcing a fresh download with a dedicated client
//!
//! ```rust,no_run
//! use rangefetch::{Config, Download, DownloadOptions, HttpClientConfig};
//! use std::time::Duration;
//!
//! # async fn example() -> rangefetch::Result<()> {
//! let config = Config::from_http_config(HttpClientConfig {
//!     timeout: Some(Duration::from_secs(60)),
//!     ..HttpClientConfig::default()
//! })?;
//! let options = DownloadOptions::new().force_restart(true).config(config);
//! let mut download = Download::with_options("index.json", "https://example.com/index.json", options).await?;
//! download.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
#[allow(clippy::module_inception)]
pub mod download;
pub mod options;
pub mod resume;

pub use config::Config;
pub use download::{Download, ProgressHandle};
pub use options::DownloadOptions;
pub use resume::{negotiate, Negotiated, Phase, ResumeState};
