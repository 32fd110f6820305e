//! Content length and content range header parsing.
//!
//! Range responses describe what they carry with a `Content-Range` header of
//! the form `bytes <first>-<last>/<complete-length>`, where the complete
//! length may be `*` when the server does not know it.

use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_RANGE};

/// A parsed `Content-Range` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentRange {
    /// Offset of the first byte in the body.
    pub start: u64,
    /// Offset of the last byte in the body, inclusive.
    pub end: u64,
    /// Complete length of the resource, `None` for `*`.
    pub total: Option<u64>,
}

impl ContentRange {
    /// Number of bytes the response body carries.
    pub fn length(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Parse a `Content-Range` header value.
///
/// Returns `None` for anything but a satisfied byte range, including the
/// `bytes */<length>` form sent along with `416 Range Not Satisfiable`.
///
/// # Example
///
/// ```rust
/// use rangefetch::utils::{parse_content_range, ContentRange};
///
/// let range = parse_content_range("bytes 200-1023/1024");
/// assert_eq!(range, Some(ContentRange { start: 200, end: 1023, total: Some(1024) }));
/// ```
pub fn parse_content_range(content_range: &str) -> Option<ContentRange> {
    let rest = content_range.trim().strip_prefix("bytes")?;
    let (range, total) = rest.trim_start().split_once('/')?;
    let (start, end) = range.trim().split_once('-')?;
    let start = start.trim().parse::<u64>().ok()?;
    let end = end.trim().parse::<u64>().ok()?;
    // The body length `end - start + 1` must fit in a u64.
    if end < start || end == u64::MAX {
        return None;
    }

    let total = match total.trim() {
        "*" => None,
        total => {
            let total = total.parse::<u64>().ok()?;
            if end >= total {
                return None;
            }
            Some(total)
        }
    };

    Some(ContentRange { start, end, total })
}

/// Parse `Content-Range` header to extract the complete length.
///
/// # Example
///
/// ```rust
/// use rangefetch::utils::parse_content_range_total;
///
/// assert_eq!(parse_content_range_total("bytes 0-1023/2048"), Some(2048));
/// assert_eq!(parse_content_range_total("bytes 0-1023/*"), None);
/// ```
pub fn parse_content_range_total(content_range: &str) -> Option<u64> {
    parse_content_range(content_range).and_then(|range| range.total)
}

/// Read and parse the `Content-Range` header of a response.
///
/// `None` when the header is missing, not valid UTF-8, or malformed.
pub fn content_range(headers: &HeaderMap) -> Option<ContentRange> {
    headers
        .get(CONTENT_RANGE)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_content_range)
}

/// Read the `Content-Length` header of a response.
///
/// `None` when the header is missing or its value is not an u64.
pub fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
}
