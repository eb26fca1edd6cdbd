//! Runs an application against a single gateway event.

use tracing::{debug, info_span};

use crate::core::{config::AdapterConfig, event::IncomingEvent, models::ProxyResponse};
use crate::errors::AdapterError;
use crate::request::{RequestContext, translate_with};
use crate::response::ResponseCapture;

/// Translates `event`, calls `app` with the request context and a fresh
/// [`ResponseCapture`], and finalizes whatever the application emitted.
///
/// The application returns the deferred part of its body as any sequence of
/// byte chunks. Its errors are not inspected and come back as
/// [`AdapterError::Handler`].
///
/// # Errors
///
/// Returns [`AdapterError::MalformedEvent`] or [`AdapterError::DecodingError`]
/// from translation or finalization, and [`AdapterError::Handler`] when the
/// application fails.
///
/// # Example
///
/// ```
/// use gatewire::{IncomingEvent, RequestContext, ResponseCapture, dispatch};
///
/// let event = IncomingEvent {
///     http_method: Some("GET".to_string()),
///     path: Some("/missing".to_string()),
///     ..IncomingEvent::default()
/// };
///
/// let response = dispatch(&event, |_ctx: RequestContext, res: &mut ResponseCapture| {
///     res.begin("404 Not Found", [("Content-Type", "text/plain")]);
///     Ok::<_, std::convert::Infallible>(vec!["not found"])
/// })
/// .unwrap();
///
/// assert_eq!(response.status_code, "404");
/// assert_eq!(response.body, "not found");
/// ```
pub fn dispatch<F, B, E>(event: &IncomingEvent, app: F) -> Result<ProxyResponse, AdapterError>
where
    F: FnOnce(RequestContext, &mut ResponseCapture) -> Result<B, E>,
    B: IntoIterator,
    B::Item: AsRef<[u8]>,
    E: Into<lambda_runtime::Error>,
{
    dispatch_with(event, &AdapterConfig::default(), app)
}

/// Same as [`dispatch`], taking fallback server facts from `config`.
pub fn dispatch_with<F, B, E>(
    event: &IncomingEvent,
    config: &AdapterConfig,
    app: F,
) -> Result<ProxyResponse, AdapterError>
where
    F: FnOnce(RequestContext, &mut ResponseCapture) -> Result<B, E>,
    B: IntoIterator,
    B::Item: AsRef<[u8]>,
    E: Into<lambda_runtime::Error>,
{
    let ctx = translate_with(event, config)?;
    let span = info_span!("dispatch", method = %ctx.method, path = %ctx.path);
    let _guard = span.enter();

    let mut capture = ResponseCapture::new();
    let deferred = app(ctx, &mut capture).map_err(|e| AdapterError::Handler(e.into()))?;
    debug!(status = %capture.status(), "Application returned");

    capture.finalize(deferred)
}
