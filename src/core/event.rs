//! Inbound API Gateway proxy-integration event.

use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::errors::AdapterError;

/// The subset of the gateway's proxy event the adapter reads.
///
/// `http_method` and `path` are optional here so that their absence is
/// reported by the translator as [`AdapterError::MalformedEvent`] rather
/// than as a deserialization failure. Every other field tolerates `null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingEvent {
    pub http_method: Option<String>,
    pub path: Option<String>,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: Option<bool>,
}

impl IncomingEvent {
    /// Parses a raw Lambda payload into an event.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::MalformedEvent`] if the payload is not an object
    /// or one of its fields has the wrong JSON type.
    pub fn from_value(payload: Value) -> Result<Self, AdapterError> {
        if !payload.is_object() {
            return Err(AdapterError::MalformedEvent(
                "event payload is not a JSON object".to_string(),
            ));
        }
        Ok(serde_json::from_value(payload)?)
    }

    #[must_use]
    pub fn is_binary(&self) -> bool {
        self.is_base64_encoded.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserializes_gateway_field_names() {
        let event = IncomingEvent::from_value(json!({
            "httpMethod": "POST",
            "path": "/submit",
            "headers": {"Content-Type": "text/plain"},
            "queryStringParameters": {"q": "rust"},
            "body": "aGk=",
            "isBase64Encoded": true,
            "requestContext": {"stage": "prod"}
        }))
        .unwrap();

        assert_eq!(event.http_method.as_deref(), Some("POST"));
        assert_eq!(event.path.as_deref(), Some("/submit"));
        assert_eq!(event.headers.unwrap()["Content-Type"], "text/plain");
        assert_eq!(event.query_string_parameters.unwrap()["q"], "rust");
        assert_eq!(event.body.as_deref(), Some("aGk="));
        assert_eq!(event.is_base64_encoded, Some(true));
    }

    #[test]
    fn test_null_optional_fields() {
        let event = IncomingEvent::from_value(json!({
            "httpMethod": "GET",
            "path": "/",
            "headers": null,
            "queryStringParameters": null,
            "body": null,
            "isBase64Encoded": null
        }))
        .unwrap();

        assert!(event.headers.is_none());
        assert!(event.query_string_parameters.is_none());
        assert!(event.body.is_none());
        assert!(!event.is_binary());
    }

    #[test]
    fn test_rejects_non_object_payload() {
        let err = IncomingEvent::from_value(json!("GET /")).unwrap_err();
        assert!(matches!(err, AdapterError::MalformedEvent(_)));
    }

    #[test]
    fn test_rejects_wrongly_typed_field() {
        let err = IncomingEvent::from_value(json!({"httpMethod": 7, "path": "/"})).unwrap_err();
        assert!(matches!(err, AdapterError::MalformedEvent(_)));
    }
}
