//! Gatewire - runs synchronous request/response handlers behind API Gateway.
//!
//! API Gateway's proxy integration delivers each HTTP request to Lambda as a
//! JSON event and expects a JSON object describing the response. This crate
//! sits between that contract and ordinary handler code:
//!
//! 1. The request translator turns the event into a [`RequestContext`]
//!    (method, path, query string, server facts, `HTTP_*` headers, body stream)
//! 2. The application is called with that context and a [`ResponseCapture`]
//!    on which it starts the response and optionally writes body text
//! 3. The captured status, headers and body are packaged into a
//!    [`ProxyResponse`], base64-encoding the body unless the declared content
//!    type is textual
//!
//! # Example
//!
//! ```no_run
//! use gatewire::{AdapterConfig, RequestContext, ResponseCapture};
//!
//! fn hello(
//!     ctx: RequestContext,
//!     res: &mut ResponseCapture,
//! ) -> Result<Vec<String>, lambda_runtime::Error> {
//!     res.begin("200 OK", [("Content-Type", "text/plain")]);
//!     Ok(vec![format!("hello from {}", ctx.path)])
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lambda_runtime::Error> {
//!     gatewire::setup_logging();
//!     let config = AdapterConfig::from_env()?;
//!     let config = &config;
//!     lambda_runtime::run(lambda_runtime::service_fn(move |event| async move {
//!         gatewire::lambda::handle_event(event, config, hello)
//!     }))
//!     .await
//! }
//! ```
pub mod core;
pub mod dispatch;
pub mod errors;
pub mod lambda;
pub mod request;
pub mod response;

pub use crate::core::config::AdapterConfig;
pub use crate::core::event::IncomingEvent;
pub use crate::core::models::ProxyResponse;
pub use dispatch::{dispatch, dispatch_with};
pub use errors::AdapterError;
pub use request::{RequestContext, translate, translate_with};
pub use response::ResponseCapture;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Installs a tracing-subscriber JSON formatter suitable for `CloudWatch`
/// Logs. Calling it again after a subscriber is installed has no effect.
///
/// # Example
///
/// ```
/// gatewire::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
