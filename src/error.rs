//! Error handling for the rangefetch library.
//!
//! Every failure of the download engine is returned as an [`Error`]; nothing
//! panics and nothing is retried internally. The variants fall into four
//! classes:
//!
//! - protocol/input errors, raised while constructing a
//!   [`Download`](crate::Download) and before any file is touched
//!   ([`Error::InvalidUrl`], [`Error::UnsupportedScheme`], connection failures
//!   reported through [`Error::Request`]);
//! - server errors, also raised during construction ([`Error::Status`],
//!   [`Error::InvalidRange`]);
//! - transfer errors, raised by [`Download::run`](crate::Download::run)
//!   ([`Error::IOError`], [`Error::Request`] for a broken stream,
//!   [`Error::SizeMismatch`]);
//! - API misuse ([`Error::AlreadyFinished`], [`Error::InvalidInterval`]).
//!
//! A server answering `200 OK` to a range request is not an error: the
//! download silently restarts from zero, see
//! [`ResumeState::Restarting`](crate::ResumeState::Restarting).

use reqwest::StatusCode;
use std::io;
use thiserror::Error;

/// Errors that can happen when using rangefetch.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// Typically the HTTP client could not be built (TLS backend
    /// initialization, invalid proxy).
    #[error("Internal error: {0}")]
    Internal(String),

    /// The URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The URL parsed, but its scheme is neither `http` nor `https`.
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// I/O Error.
    ///
    /// Wraps failures to inspect, open, write or flush the destination file.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the HTTP client or its middleware stack.
    ///
    /// Raised for DNS and connection failures while probing, and for a
    /// response body that breaks off during the transfer.
    #[error("Request error")]
    Request {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// The server answered with a non-success status.
    #[error("Server returned {status} for {url}")]
    Status { status: StatusCode, url: String },

    /// The server answered a range request with a partial response the
    /// download cannot trust.
    #[error("Invalid partial content: {0}")]
    InvalidRange(String),

    /// The response body did not match the negotiated size.
    #[error("Size mismatch: expected {expected} bytes, received {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    /// The transfer already ran, or its response was handed out.
    #[error("The download has no pending transfer")]
    AlreadyFinished,

    /// A polling interval of zero was requested.
    #[error("The polling interval must be greater than zero")]
    InvalidInterval,
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Request {
            source: reqwest_middleware::Error::Reqwest(source),
        }
    }
}

/// Result type alias for operations that can fail with a rangefetch error.
pub type Result<T> = std::result::Result<T, Error>;
