//! Glue between `lambda_runtime` and the dispatcher.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use crate::core::{config::AdapterConfig, event::IncomingEvent, models::ProxyResponse};
use crate::dispatch::dispatch_with;
use crate::errors::AdapterError;
use crate::request::RequestContext;
use crate::response::ResponseCapture;

/// Handles one proxy-integration invocation.
///
/// Meant to be called from inside a `lambda_runtime::service_fn` closure.
/// Every failure is returned to the runtime, which reports it as an
/// unhandled error to the gateway.
///
/// # Errors
///
/// Returns an error if the payload is not a proxy event, the body cannot be
/// decoded, or the application fails.
#[tracing::instrument(level = "info", skip_all, fields(request_id = %event.context.request_id))]
pub fn handle_event<F, B, E>(
    event: LambdaEvent<Value>,
    config: &AdapterConfig,
    app: F,
) -> Result<ProxyResponse, Error>
where
    F: FnOnce(RequestContext, &mut ResponseCapture) -> Result<B, E>,
    B: IntoIterator,
    B::Item: AsRef<[u8]>,
    E: Into<Error>,
{
    #[cfg(feature = "debug-logs")]
    info!("Received gateway event: {:?}", event.payload);
    #[cfg(not(feature = "debug-logs"))]
    info!("Received gateway event [... payload masked, enable debug-logs feature to view ...]");

    let incoming = IncomingEvent::from_value(event.payload).map_err(|e| {
        error!("Rejected gateway payload: {}", e);
        Error::from(e)
    })?;

    let response = dispatch_with(&incoming, config, app).map_err(|e| {
        error!("Dispatch failed: {}", e);
        match e {
            AdapterError::Handler(inner) => inner,
            other => Error::from(other),
        }
    })?;

    info!(
        status = %response.status_code,
        base64 = response.is_base64_encoded,
        "Returning gateway response"
    );
    Ok(response)
}
