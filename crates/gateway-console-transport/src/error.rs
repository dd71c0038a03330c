//! Transport error type.

use thiserror::Error;

/// Failure at a transport boundary.
///
/// Prompt drivers never surface this: they convert every failure into a
/// `GatewayReply::Error`. It escapes only from operations that have no
/// reply to wrap it in (connecting a WebSocket, probing health).
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("WebSocket failure: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
    #[error("connection closed")]
    Closed,
}
