//! AWS Lambda handler: scenario JSON in, comparison JSON out
//!
//! POST a [`ScenarioConfig`] document (an empty body runs the defaults).
//! Invalid input answers 400 with `{"error": "..."}`.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use serde_json::json;

use savings_simulator::ScenarioConfig;

async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let outcome = ScenarioConfig::from_json(event.body().as_ref()).and_then(|config| config.run());

    let (status, payload): (u16, serde_json::Value) = match outcome {
        Ok(result) => (200, serde_json::to_value(&result)?),
        Err(e) if e.is_invalid_input() => {
            log::info!("rejected scenario: {}", e);
            (400, json!({ "error": e.to_string() }))
        }
        Err(e) => {
            log::error!("scenario failed: {}", e);
            (500, json!({ "error": e.to_string() }))
        }
    };

    let response = Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))?;
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
