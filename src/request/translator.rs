use base64::{Engine as _, engine::general_purpose::STANDARD};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, error};

use super::headers::{ENVIRON_PREFIX, first_forwarded_for, normalize_header_name};
use super::{CALLING_CONVENTION_VERSION, RequestBody, RequestContext, SERVER_PROTOCOL};
use crate::core::{config::AdapterConfig, event::IncomingEvent};
use crate::errors::AdapterError;

/// Builds a [`RequestContext`] from a gateway event using the default
/// placeholder server facts.
///
/// # Errors
///
/// Returns [`AdapterError::MalformedEvent`] if `httpMethod` or `path` is
/// missing, and [`AdapterError::DecodingError`] if a body flagged as base64
/// does not decode.
pub fn translate(event: &IncomingEvent) -> Result<RequestContext, AdapterError> {
    translate_with(event, &AdapterConfig::default())
}

/// Same as [`translate`], taking fallback server facts from `config`.
pub fn translate_with(
    event: &IncomingEvent,
    config: &AdapterConfig,
) -> Result<RequestContext, AdapterError> {
    let Some(method) = event.http_method.as_deref() else {
        error!("Gateway event missing httpMethod");
        return Err(AdapterError::MalformedEvent("missing httpMethod".to_string()));
    };
    let Some(path) = event.path.as_deref() else {
        error!("Gateway event missing path");
        return Err(AdapterError::MalformedEvent("missing path".to_string()));
    };

    let body = decode_body(event)?;

    let mut ctx = RequestContext {
        method: method.to_string(),
        script_name: String::new(),
        path: path.to_string(),
        query_string: encode_query(event.query_string_parameters.as_ref()),
        content_type: None,
        content_length: body.len(),
        server_name: config.server_name.clone(),
        server_port: config.server_port.clone(),
        server_protocol: SERVER_PROTOCOL.to_string(),
        url_scheme: config.url_scheme.clone(),
        remote_addr: config.remote_addr.clone(),
        version: CALLING_CONVENTION_VERSION,
        multithread: false,
        multiprocess: false,
        run_once: false,
        headers: BTreeMap::new(),
        body: RequestBody::new(body),
    };

    if let Some(headers) = &event.headers {
        // Sorted so that names colliding after normalization resolve the same
        // way on every invocation.
        let mut entries: Vec<(&String, &String)> = headers.iter().collect();
        entries.sort();
        for (name, value) in entries {
            apply_header(&mut ctx, name, value);
        }
    }

    debug!(
        method = %ctx.method,
        path = %ctx.path,
        content_length = ctx.content_length,
        header_count = ctx.headers.len(),
        "Translated gateway event"
    );

    Ok(ctx)
}

fn decode_body(event: &IncomingEvent) -> Result<Vec<u8>, AdapterError> {
    let raw = event.body.as_deref().unwrap_or("");
    if event.is_binary() {
        Ok(STANDARD.decode(raw)?)
    } else {
        Ok(raw.as_bytes().to_vec())
    }
}

fn apply_header(ctx: &mut RequestContext, name: &str, value: &str) {
    let key = normalize_header_name(name);
    match key.as_str() {
        "CONTENT_TYPE" => ctx.content_type = Some(value.to_string()),
        "HOST" => ctx.server_name = value.to_string(),
        "X_FORWARDED_FOR" => ctx.remote_addr = first_forwarded_for(value).to_string(),
        "X_FORWARDED_PROTO" => ctx.url_scheme = value.to_string(),
        "X_FORWARDED_PORT" => ctx.server_port = value.to_string(),
        _ => {}
    }
    ctx.headers
        .insert(format!("{}{}", ENVIRON_PREFIX, key), value.to_string());
}

/// Bytes left as-is in query keys and values; space is handled separately.
const QUERY_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

/// Form-encodes query parameters with keys in ascending order.
///
/// Letters, digits and `_.-~` pass through, space becomes `+`, everything
/// else is percent-encoded as UTF-8.
///
/// ```
/// use std::collections::HashMap;
/// use gatewire::request::encode_query;
///
/// let params = HashMap::from([
///     ("q".to_string(), "rust lang".to_string()),
///     ("a".to_string(), "1&2".to_string()),
/// ]);
/// assert_eq!(encode_query(Some(&params)), "a=1%262&q=rust+lang");
///
/// let params = HashMap::from([("k".to_string(), "a~b*c".to_string())]);
/// assert_eq!(encode_query(Some(&params)), "k=a~b%2Ac");
/// assert_eq!(encode_query(None), "");
/// ```
#[must_use]
pub fn encode_query(params: Option<&HashMap<String, String>>) -> String {
    let Some(params) = params else {
        return String::new();
    };
    let sorted: BTreeMap<&str, &str> = params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    sorted
        .into_iter()
        .map(|(k, v)| format!("{}={}", quote_plus(k), quote_plus(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn quote_plus(input: &str) -> String {
    // A literal `%` is encoded as `%25`, so `%20` can only come from a space.
    utf8_percent_encode(input, QUERY_SAFE)
        .to_string()
        .replace("%20", "+")
}
