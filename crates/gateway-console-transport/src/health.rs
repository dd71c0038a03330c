//! Gateway health probe.

use gateway_console_core::GatewayAddress;
use serde_json::Value;

use crate::TransportError;

/// Probe the gateway health endpoint.
///
/// Healthy iff the response decodes as JSON with `status == "healthy"`.
/// The probe is unauthenticated.
///
/// # Errors
/// Returns an error when the gateway is unreachable or replies with a
/// non-JSON body; the caller decides how to describe that.
pub async fn check(address: &GatewayAddress) -> Result<bool, TransportError> {
    let url = format!("{}/health", address.http_base());
    let body: Value = reqwest::get(&url).await?.json().await?;
    Ok(body.get("status").and_then(Value::as_str) == Some("healthy"))
}
