// Lambda entry point that echoes the translated request back as JSON.

use std::io::Read;

use anyhow::Context as _;
use gatewire::{AdapterConfig, RequestContext, ResponseCapture};
use lambda_runtime::{Error, run, service_fn};
use serde_json::json;

fn echo(mut ctx: RequestContext, res: &mut ResponseCapture) -> anyhow::Result<Vec<Vec<u8>>> {
    let mut body = Vec::new();
    ctx.body
        .read_to_end(&mut body)
        .context("failed to read request body")?;

    let payload = json!({
        "environ": ctx.environ(),
        "body": String::from_utf8_lossy(&body),
    });

    res.begin("200 OK", [("Content-Type", "application/json")]);
    Ok(vec![serde_json::to_vec(&payload)?])
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    gatewire::setup_logging();
    let config = AdapterConfig::from_env()?;
    let config = &config;

    run(service_fn(move |event| async move {
        gatewire::lambda::handle_event(event, config, echo)
    }))
    .await
}
