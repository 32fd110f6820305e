//! Resume negotiation.
//!
//! When a destination file already holds `offset` bytes, the download asks
//! the server for `bytes=<offset>-`. The server's answer decides how the
//! transfer starts:
//!
//! | requested offset | status            | outcome                       |
//! |------------------|-------------------|-------------------------------|
//! | 0                | 2xx (not 206)     | [`ResumeState::Starting`]     |
//! | > 0              | 206               | [`ResumeState::Resuming`]     |
//! | > 0              | 2xx (not 206)     | [`ResumeState::Restarting`]   |
//! | 0                | 206               | [`Error::InvalidRange`]       |
//! | any              | not 2xx           | [`Error::Status`]             |
//!
//! A partial response is only trusted when its `Content-Range` starts exactly
//! at the requested offset and agrees with `Content-Length`.

use crate::error::{Error, Result};
use crate::utils::content_length::{content_length, content_range};

use reqwest::{header::HeaderMap, StatusCode, Url};
use std::fmt;

/// Where a download stands in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The request is in flight.
    Probing,
    /// The server honored the range request; bytes will be appended.
    Resuming,
    /// The server ignored the range request; the file will be truncated.
    Restarting,
    /// No local bytes to keep; the file will be created or truncated.
    Starting,
    /// Bytes are flowing to disk.
    Transferring,
    /// The whole body reached the disk.
    Completed,
    /// The transfer stopped on an error.
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Probing => "probing",
            Phase::Resuming => "resuming",
            Phase::Restarting => "restarting",
            Phase::Starting => "starting",
            Phase::Transferring => "transferring",
            Phase::Completed => "completed",
            Phase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// How the transfer starts, as agreed with the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeState {
    /// Fresh download from byte zero.
    Starting,
    /// Append to the `offset` bytes already on disk.
    Resuming { offset: u64 },
    /// The server sent the full body although `discarded` bytes were on
    /// disk; those bytes are thrown away.
    Restarting { discarded: u64 },
}

impl ResumeState {
    /// Offset the first received byte is written at.
    pub fn offset(&self) -> u64 {
        match self {
            ResumeState::Resuming { offset } => *offset,
            ResumeState::Starting | ResumeState::Restarting { .. } => 0,
        }
    }

    /// `true` when the destination must be truncated before writing.
    pub fn truncates(&self) -> bool {
        !matches!(self, ResumeState::Resuming { .. })
    }
}

impl From<ResumeState> for Phase {
    fn from(state: ResumeState) -> Self {
        match state {
            ResumeState::Starting => Phase::Starting,
            ResumeState::Resuming { .. } => Phase::Resuming,
            ResumeState::Restarting { .. } => Phase::Restarting,
        }
    }
}

/// Outcome of [`negotiate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Negotiated {
    /// How the transfer starts.
    pub state: ResumeState,
    /// Complete size of the resource, `None` until the body is exhausted.
    pub total: Option<u64>,
}

/// Decide how a transfer starts from the response to the initial request.
///
/// `offset` is the range start that was requested, zero when no `Range`
/// header was sent.
pub fn negotiate(
    url: &Url,
    offset: u64,
    status: StatusCode,
    headers: &HeaderMap,
) -> Result<Negotiated> {
    if !status.is_success() {
        return Err(Error::Status {
            status,
            url: url.to_string(),
        });
    }

    let length = content_length(headers);

    if status != StatusCode::PARTIAL_CONTENT {
        let state = match offset {
            0 => ResumeState::Starting,
            discarded => ResumeState::Restarting { discarded },
        };
        return Ok(Negotiated {
            state,
            total: length,
        });
    }

    if offset == 0 {
        return Err(Error::InvalidRange(format!(
            "{} answered with partial content to a plain request",
            url
        )));
    }

    let range = content_range(headers).ok_or_else(|| {
        Error::InvalidRange(format!(
            "{} answered with partial content without a usable Content-Range",
            url
        ))
    })?;

    if range.start != offset {
        return Err(Error::InvalidRange(format!(
            "requested bytes from {} but {} sent bytes from {}",
            offset, url, range.start
        )));
    }

    if let Some(length) = length {
        if length != range.length() {
            return Err(Error::InvalidRange(format!(
                "Content-Length {} disagrees with Content-Range {}-{}",
                length, range.start, range.end
            )));
        }
    }

    let total = match (range.total, length) {
        (Some(total), _) => Some(total),
        (None, Some(length)) => Some(offset.checked_add(length).ok_or_else(|| {
            Error::InvalidRange(format!(
                "{} announced a size beyond {} bytes",
                url,
                u64::MAX
            ))
        })?),
        (None, None) => None,
    };

    Ok(Negotiated {
        state: ResumeState::Resuming { offset },
        total,
    })
}
