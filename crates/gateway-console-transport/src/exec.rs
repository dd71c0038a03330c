//! Exec endpoint driver.

use async_trait::async_trait;
use gateway_console_core::{
    Credentials, GatewayAddress, GatewayReply, PromptDriver, Session,
};
use reqwest::Client;
use serde::Serialize;

use crate::http::post_classified;

/// Request body for the exec endpoint: no envelope, no message id.
#[derive(Debug, Serialize)]
struct ExecRequest<'a> {
    prompt: &'a str,
    session_id: &'a str,
}

/// Request/response driver for the batch exec endpoint.
///
/// The gateway runs the prompt to completion and replies with an ordered
/// event batch. Like the JSON-RPC driver, no request timeout is
/// configured.
pub struct ExecDriver {
    client: Client,
    url: String,
    credentials: Credentials,
}

impl ExecDriver {
    /// Create a driver for the given gateway.
    #[must_use]
    pub fn new(address: &GatewayAddress, credentials: Credentials) -> Self {
        Self {
            client: Client::new(),
            url: format!("{}/exec", address.http_base()),
            credentials,
        }
    }
}

#[async_trait]
impl PromptDriver for ExecDriver {
    fn name(&self) -> &'static str {
        "exec"
    }

    async fn call(&self, session: &mut Session, prompt: &str) -> GatewayReply {
        let request = ExecRequest {
            prompt,
            session_id: session.id(),
        };

        post_classified(&self.client, &self.url, self.credentials.api_key(), &request).await
    }
}
