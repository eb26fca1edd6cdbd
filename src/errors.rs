use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Malformed gateway event: {0}")]
    MalformedEvent(String),

    #[error("Failed to decode body: {0}")]
    DecodingError(String),

    /// Error raised by the application itself, passed through untouched.
    #[error(transparent)]
    Handler(lambda_runtime::Error),
}

impl From<base64::DecodeError> for AdapterError {
    fn from(error: base64::DecodeError) -> Self {
        AdapterError::DecodingError(format!("invalid base64: {}", error))
    }
}

impl From<std::str::Utf8Error> for AdapterError {
    fn from(error: std::str::Utf8Error) -> Self {
        AdapterError::DecodingError(format!("invalid UTF-8: {}", error))
    }
}

impl From<serde_json::Error> for AdapterError {
    fn from(error: serde_json::Error) -> Self {
        AdapterError::MalformedEvent(error.to_string())
    }
}
