//! Progress module containing progress bar functionality.
//!
//! The download engine itself only exposes a byte counter; this module turns
//! that counter into an [`indicatif`] progress bar, typically fed from
//! [`Download::run_and_poll`](crate::Download::run_and_poll).
//!
//! # Examples
//!
//! ```rust
//! use rangefetch::progress::ProgressBarOpts;
//!
//! let opts = ProgressBarOpts::new(
//!     Some("[{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}".to_string()),
//!     Some(ProgressBarOpts::CHARS_FINE.to_string()),
//!     true,
//!     false,
//! );
//! let bar = opts.to_progress_bar(1024).unwrap();
//! bar.set_position(512);
//! ```

pub(crate) mod style;

pub use style::ProgressBarOpts;
