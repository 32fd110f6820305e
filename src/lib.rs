//! Rangefetch downloads files over HTTP(S) and picks up where an interrupted
//! download left off.
//!
//! A [`Download`] looks at the destination file, asks the server for the
//! missing bytes with a range request, and falls back to a full download when
//! the server ignores the range. Progress is observable at any time through a
//! byte counter, either directly or with a periodic callback.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rangefetch::{Download, Error};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let url = "https://downloads.example.com/cores/avr-1.6.20.tar.bz2";
//! let mut download = Download::new("avr-1.6.20.tar.bz2", url).await?;
//! download.run().await?;
//! println!("{} of {} bytes", download.completed(), download.size());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`download`] - The download job, resume negotiation and transfer configuration
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - HTTP client construction
//! - [`progress`] - Progress bar styling for polled downloads
//! - [`utils`] - Header parsing helpers

pub mod download;
pub mod error;
pub mod http;
pub mod progress;
pub mod utils;

pub use download::{
    Config, Download, DownloadOptions, Negotiated, Phase, ProgressHandle, ResumeState,
};
pub use error::{Error, Result};
pub use http::{create_http_client, HttpClientConfig};
pub use progress::ProgressBarOpts;
pub use utils::content_length::{parse_content_range, parse_content_range_total, ContentRange};
