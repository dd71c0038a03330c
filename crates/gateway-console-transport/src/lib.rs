//! Transport drivers for the gateway console.
//!
//! Provides:
//! - `RpcDriver` - HTTP JSON-RPC request/response
//! - `ExecDriver` - Batch exec endpoint returning ordered events
//! - `websocket::connect` / `WsSession` - Persistent duplex channel
//! - `health::check` - Gateway health probe

pub mod error;
pub mod exec;
pub mod health;
pub mod rpc;
pub mod websocket;

mod http;

pub use error::TransportError;
pub use exec::ExecDriver;
pub use rpc::RpcDriver;
pub use websocket::{WsFrame, WsSession};
