//! HTTP JSON-RPC driver.

use async_trait::async_trait;
use gateway_console_core::{
    Credentials, GatewayAddress, GatewayReply, PromptDriver, Session,
};
use reqwest::Client;
use serde::Serialize;

use crate::http::post_classified;

/// Method invoked for every prompt.
const PROMPT_METHOD: &str = "conversation.prompt";

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: RpcParams<'a>,
    id: u64,
}

#[derive(Debug, Serialize)]
struct RpcParams<'a> {
    prompt: &'a str,
    session_id: &'a str,
}

/// Request/response driver speaking JSON-RPC 2.0 over HTTP.
///
/// No request timeout is configured, matching the gateway's other
/// clients: an unresponsive gateway blocks the call indefinitely.
pub struct RpcDriver {
    client: Client,
    url: String,
    credentials: Credentials,
}

impl RpcDriver {
    /// Create a driver for the given gateway.
    #[must_use]
    pub fn new(address: &GatewayAddress, credentials: Credentials) -> Self {
        Self {
            client: Client::new(),
            url: format!("{}/jsonrpc", address.http_base()),
            credentials,
        }
    }
}

#[async_trait]
impl PromptDriver for RpcDriver {
    fn name(&self) -> &'static str {
        "json-rpc"
    }

    async fn call(&self, session: &mut Session, prompt: &str) -> GatewayReply {
        // The id is consumed up front: a failed call still uses it up.
        let id = session.allocate_message_id();
        let request = RpcRequest {
            jsonrpc: "2.0",
            method: PROMPT_METHOD,
            params: RpcParams {
                prompt,
                session_id: session.id(),
            },
            id,
        };

        post_classified(&self.client, &self.url, self.credentials.api_key(), &request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn driver_for(server: &MockServer) -> RpcDriver {
        let address = GatewayAddress::new(&server.base_url());
        RpcDriver::new(&address, Credentials::new("test-key"))
    }

    #[tokio::test]
    async fn test_sends_envelope_and_api_key_header() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/jsonrpc")
                .header("X-API-Key", "test-key")
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "jsonrpc": "2.0",
                    "method": "conversation.prompt",
                    "params": {"prompt": "hello", "session_id": "s-1"},
                    "id": 1
                }));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"result": {"content": "hi"}}));
        });

        let driver = driver_for(&server);
        let mut session = Session::with_id("s-1");
        let reply = driver.call(&mut session, "hello").await;

        mock.assert();
        match reply {
            GatewayReply::Structured { content, .. } => {
                assert_eq!(content.as_deref(), Some("hi"));
            }
            other => panic!("expected structured reply, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_message_ids_increment_even_when_a_call_fails() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/jsonrpc").json_body_includes(
                json!({"id": 2}).to_string(),
            );
            then.status(200)
                .json_body(json!({"result": "second"}));
        });
        server.mock(|when, then| {
            when.method(POST).path("/jsonrpc").json_body_includes(
                json!({"id": 3}).to_string(),
            );
            then.status(200)
                .json_body(json!({"result": "third"}));
        });

        // First call goes to a dead port and fails; its id is still consumed.
        let dead = GatewayAddress::new("http://127.0.0.1:1");
        let failing = RpcDriver::new(&dead, Credentials::new("test-key"));
        let mut session = Session::with_id("s-1");
        let reply = failing.call(&mut session, "lost").await;
        assert!(matches!(reply, GatewayReply::Error { .. }));

        let driver = driver_for(&server);
        let second = driver.call(&mut session, "again").await;
        let third = driver.call(&mut session, "once more").await;
        assert_eq!(
            second,
            GatewayReply::Scalar {
                value: json!("second")
            }
        );
        assert_eq!(
            third,
            GatewayReply::Scalar {
                value: json!("third")
            }
        );
        assert_eq!(session.next_message_id(), 4);
    }

    #[tokio::test]
    async fn test_gateway_error_field_maps_to_error_reply() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/jsonrpc");
            then.status(200).json_body(json!({
                "jsonrpc": "2.0",
                "error": {"code": -32601, "message": "Method not found"},
                "id": 1
            }));
        });

        let driver = driver_for(&server);
        let mut session = Session::with_id("s-1");
        let reply = driver.call(&mut session, "hello").await;
        assert_eq!(
            reply,
            GatewayReply::Error {
                message: "Method not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_non_json_body_wraps_status_and_text() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/jsonrpc");
            then.status(502).body("bad gateway");
        });

        let driver = driver_for(&server);
        let mut session = Session::with_id("s-1");
        let reply = driver.call(&mut session, "hello").await;
        assert_eq!(
            reply,
            GatewayReply::Error {
                message: "HTTP 502: bad gateway".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_connection_refused_becomes_error_reply() {
        let dead = GatewayAddress::new("http://127.0.0.1:1");
        let driver = RpcDriver::new(&dead, Credentials::new("test-key"));
        let mut session = Session::with_id("s-1");
        let reply = driver.call(&mut session, "hello").await;
        assert!(matches!(reply, GatewayReply::Error { .. }));
    }
}
