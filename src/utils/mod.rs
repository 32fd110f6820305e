//! Shared utility functions.
//!
//! - [`content_length`] - `Content-Length` and `Content-Range` parsing
//!
//! # Examples
//!
//! ```rust
//! use rangefetch::utils::parse_content_range_total;
//!
//! let header_value = "bytes 0-1023/2048";
//! if let Some(total_size) = parse_content_range_total(header_value) {
//!     println!("Total file size: {} bytes", total_size);
//! }
//! ```

pub mod content_length;

pub use content_length::{
    content_length, content_range, parse_content_range, parse_content_range_total, ContentRange,
};
