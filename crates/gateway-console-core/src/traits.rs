//! Driver trait shared by the request/response transports.

use async_trait::async_trait;

use crate::{GatewayReply, Session};

/// A transport that exchanges one prompt for a normalized reply.
///
/// Implementations never fail: transport and protocol failures come back
/// as `GatewayReply::Error`, so the interactive loop always has something
/// to render.
#[async_trait]
pub trait PromptDriver: Send + Sync {
    /// Transport name for menus and logs.
    fn name(&self) -> &'static str;

    /// Send `prompt` to the gateway and normalize the response.
    ///
    /// Takes the session mutably: the JSON-RPC driver consumes a message
    /// id per call, other transports leave the counter untouched.
    async fn call(&self, session: &mut Session, prompt: &str) -> GatewayReply;
}
