//! Shared HTTP request path for the request/response drivers.

use gateway_console_core::{GatewayReply, classify};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

/// Header carrying the API key on every HTTP call.
pub(crate) const API_KEY_HEADER: &str = "X-API-Key";

/// POST a JSON payload and normalize whatever comes back.
///
/// A body that parses as JSON goes through the classifier; anything else
/// is wrapped as an error carrying the status code and body text. Network
/// failures become errors too — this function never fails.
pub(crate) async fn post_classified(
    client: &Client,
    url: &str,
    api_key: &str,
    payload: &(impl Serialize + Sync),
) -> GatewayReply {
    let response = match client
        .post(url)
        .header(API_KEY_HEADER, api_key)
        .json(payload)
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!("gateway request failed: {e}");
            return GatewayReply::Error {
                message: e.to_string(),
            };
        }
    };

    let status = response.status();
    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => {
            return GatewayReply::Error {
                message: e.to_string(),
            };
        }
    };

    match serde_json::from_str::<Value>(&text) {
        Ok(body) => classify(body),
        Err(_) => GatewayReply::Error {
            message: format!("HTTP {}: {text}", status.as_u16()),
        },
    }
}
