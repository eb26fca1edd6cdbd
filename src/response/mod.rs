//! Capture of handler output and packaging into the gateway response.

pub mod capture;
pub mod encoding;

pub use capture::{BodyWriter, ResponseCapture, SENTINEL_STATUS};
pub use encoding::{BodyEncoding, collapse_headers};
