//! Persistent WebSocket channel to the gateway.

use futures::{SinkExt, StreamExt};
use gateway_console_core::{Credentials, GatewayAddress};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;

use crate::TransportError;

/// Decoded inbound frame: JSON when the payload parses, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum WsFrame {
    Json(Value),
    Text(String),
}

impl WsFrame {
    fn from_text(text: &str) -> Self {
        serde_json::from_str(text)
            .map_or_else(|_| Self::Text(text.to_string()), Self::Json)
    }
}

/// Live duplex session with the gateway.
///
/// Two loops run for the lifetime of the connection: a receive loop that
/// decodes inbound frames, and a send loop that forwards outbound lines.
/// They share one cancellation token — either loop terminating (clean
/// close, stream end, or I/O error) cancels the other, so a dead
/// connection never leaks a task. Sends against a dead session fail fast
/// with `TransportError::Closed`.
pub struct WsSession {
    outbound: mpsc::Sender<String>,
    inbound: mpsc::Receiver<WsFrame>,
    closed: CancellationToken,
}

/// Open a WebSocket session.
///
/// The API key travels as a query parameter: there is no header slot
/// before the handshake completes.
///
/// # Errors
/// Returns an error when the handshake fails.
pub async fn connect(
    address: &GatewayAddress,
    credentials: &Credentials,
) -> Result<WsSession, TransportError> {
    let url = format!("{}/ws?api_key={}", address.ws_base(), credentials.api_key());
    let (stream, _) = tokio_tungstenite::connect_async(url).await?;
    tracing::debug!(endpoint = %address.ws_base(), "WebSocket connected");

    let (mut sink, mut source) = stream.split();
    let closed = CancellationToken::new();
    let (in_tx, in_rx) = mpsc::channel::<WsFrame>(64);
    let (out_tx, mut out_rx) = mpsc::channel::<String>(8);

    let recv_cancel = closed.clone();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                () = recv_cancel.cancelled() => break,
                inbound = source.next() => match inbound {
                    Some(Ok(Message::Text(text))) => {
                        if in_tx.send(WsFrame::from_text(text.as_str())).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Binary(data))) => {
                        let Ok(text) = String::from_utf8(data.to_vec()) else {
                            continue;
                        };
                        if in_tx.send(WsFrame::from_text(&text)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    // Ping/pong are answered by tungstenite itself.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket receive failed: {e}");
                        break;
                    }
                },
            }
        }
        // Receive side is down: take the send loop with it.
        recv_cancel.cancel();
    });

    let send_cancel = closed.clone();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                () = send_cancel.cancelled() => break,
                line = out_rx.recv() => match line {
                    Some(line) => {
                        if let Err(e) = sink.send(Message::Text(line.into())).await {
                            tracing::warn!("WebSocket send failed: {e}");
                            break;
                        }
                    }
                    None => break,
                },
            }
        }
        let _ = sink.close().await;
        send_cancel.cancel();
    });

    Ok(WsSession {
        outbound: out_tx,
        inbound: in_rx,
        closed,
    })
}

impl WsSession {
    /// Receive the next decoded frame; `None` once the connection is down.
    pub async fn recv(&mut self) -> Option<WsFrame> {
        self.inbound.recv().await
    }

    /// Forward one line to the gateway as a raw text frame.
    ///
    /// # Errors
    /// Returns `Closed` when either loop has already terminated.
    pub async fn send(&self, line: impl Into<String> + Send) -> Result<(), TransportError> {
        if self.closed.is_cancelled() {
            return Err(TransportError::Closed);
        }
        self.outbound
            .send(line.into())
            .await
            .map_err(|_| TransportError::Closed)
    }

    /// Operator-initiated shutdown of both loops.
    pub fn close(&self) {
        self.closed.cancel();
    }

    /// Whether the session has wound down.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }
}

impl Drop for WsSession {
    fn drop(&mut self) {
        self.closed.cancel();
    }
}
