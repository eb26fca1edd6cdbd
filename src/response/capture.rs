use std::fmt;
use tracing::debug;

use super::encoding::{BodyEncoding, collapse_headers};
use crate::core::models::ProxyResponse;
use crate::errors::AdapterError;

/// Status reported when the application never starts a response.
pub const SENTINEL_STATUS: &str = "500";

/// Per-invocation sink for the application's status, headers and body.
///
/// The application calls [`begin`](Self::begin) (possibly more than once),
/// optionally writes body text eagerly, and returns the remaining body as a
/// sequence of byte chunks which the dispatcher hands to
/// [`finalize`](Self::finalize).
#[derive(Debug)]
pub struct ResponseCapture {
    status: String,
    headers: Vec<(String, String)>,
    written: String,
}

impl Default for ResponseCapture {
    fn default() -> Self {
        Self {
            status: SENTINEL_STATUS.to_string(),
            headers: Vec::new(),
            written: String::new(),
        }
    }
}

impl ResponseCapture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) the response.
    ///
    /// Only the leading token of `status_line` is kept, so `"404 Not Found"`
    /// records `"404"`. Status and headers from any earlier call are replaced
    /// wholesale. Text written before a restart is kept.
    pub fn begin<I, K, V>(&mut self, status_line: &str, headers: I) -> BodyWriter<'_>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.status = status_line
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        self.headers = headers
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        BodyWriter {
            buffer: &mut self.written,
        }
    }

    /// Appends text to the eager body buffer.
    pub fn write(&mut self, chunk: &str) {
        self.written.push_str(chunk);
    }

    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    #[must_use]
    pub fn written(&self) -> &str {
        &self.written
    }

    /// Packages the captured state and the deferred body into the gateway
    /// response.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::DecodingError`] if the text encoding is chosen
    /// and a deferred chunk is not valid UTF-8.
    pub fn finalize<I>(self, deferred: I) -> Result<ProxyResponse, AdapterError>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let headers = collapse_headers(&self.headers);
        let encoding = BodyEncoding::select(&headers);
        let body = encoding.encode(&self.written, deferred)?;

        debug!(
            status = %self.status,
            encoding = ?encoding,
            header_count = headers.len(),
            "Finalized gateway response"
        );

        Ok(ProxyResponse {
            status_code: self.status,
            headers,
            body,
            is_base64_encoded: encoding.is_base64(),
        })
    }
}

/// Write handle returned by [`ResponseCapture::begin`].
#[derive(Debug)]
pub struct BodyWriter<'a> {
    buffer: &'a mut String,
}

impl BodyWriter<'_> {
    pub fn write(&mut self, chunk: &str) {
        self.buffer.push_str(chunk);
    }
}

impl fmt::Write for BodyWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s);
        Ok(())
    }
}
