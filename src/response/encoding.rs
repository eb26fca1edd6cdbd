//! Text vs. base64 body encoding for the outgoing response.
//!
//! The choice is made from the declared `Content-Type` and
//! `Content-Encoding` headers only; body bytes are never inspected.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::collections::BTreeMap;

use crate::errors::AdapterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    Text,
    Binary,
}

impl BodyEncoding {
    /// Picks the encoding for a collapsed header map.
    ///
    /// Binary when the body is gzip-encoded, or when the content type is
    /// neither `text/*` nor exactly `application/json`. A missing content
    /// type counts as the empty string and therefore selects binary. Header
    /// names are matched exactly, so `content-type` is not consulted.
    #[must_use]
    pub fn select(headers: &BTreeMap<String, String>) -> Self {
        let content_type = headers.get("Content-Type").map_or("", String::as_str);
        let gzipped = headers.get("Content-Encoding").map(String::as_str) == Some("gzip");

        if gzipped || (!content_type.starts_with("text/") && content_type != "application/json")
        {
            BodyEncoding::Binary
        } else {
            BodyEncoding::Text
        }
    }

    #[must_use]
    pub fn is_base64(self) -> bool {
        self == BodyEncoding::Binary
    }

    /// Joins the eagerly written text with the deferred chunks.
    ///
    /// # Errors
    ///
    /// In text mode, returns [`AdapterError::DecodingError`] if a chunk is not
    /// valid UTF-8.
    pub fn encode<I>(self, written: &str, chunks: I) -> Result<String, AdapterError>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        match self {
            BodyEncoding::Binary => {
                let mut raw = written.as_bytes().to_vec();
                for chunk in chunks {
                    raw.extend_from_slice(chunk.as_ref());
                }
                Ok(STANDARD.encode(raw))
            }
            BodyEncoding::Text => {
                let mut text = written.to_string();
                for chunk in chunks {
                    text.push_str(std::str::from_utf8(chunk.as_ref())?);
                }
                Ok(text)
            }
        }
    }
}

/// Collapses an ordered header list into a map. Later duplicates of the same
/// name replace earlier ones.
#[must_use]
pub fn collapse_headers(headers: &[(String, String)]) -> BTreeMap<String, String> {
    headers.iter().cloned().collect()
}
