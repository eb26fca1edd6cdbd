//! Header name normalization for the request environment

pub const ENVIRON_PREFIX: &str = "HTTP_";

/// Uppercases a header name and replaces `-` with `_`.
///
/// ```
/// use gatewire::request::headers::normalize_header_name;
///
/// assert_eq!(normalize_header_name("X-Forwarded-For"), "X_FORWARDED_FOR");
/// assert_eq!(normalize_header_name("content-type"), "CONTENT_TYPE");
/// ```
#[must_use]
pub fn normalize_header_name(name: &str) -> String {
    name.to_ascii_uppercase().replace('-', "_")
}

#[must_use]
pub fn environ_key(name: &str) -> String {
    format!("{}{}", ENVIRON_PREFIX, normalize_header_name(name))
}

/// First hop of an `X-Forwarded-For` chain.
#[must_use]
pub fn first_forwarded_for(value: &str) -> &str {
    value.split(", ").next().unwrap_or(value)
}
