//! Core abstractions for the gateway console client.
//!
//! This crate provides the fundamental building blocks:
//! - `GatewayAddress` - Normalized http/ws endpoint forms
//! - `Session` - Per-process identity and message-id counter
//! - `Credentials` - Resolved API key, shared by all transports
//! - `GatewayReply` / `classify` - Tagged result model over raw responses
//! - `PromptDriver` trait

pub mod credentials;
pub mod endpoint;
pub mod reply;
pub mod session;
pub mod traits;

pub use credentials::Credentials;
pub use endpoint::GatewayAddress;
pub use reply::{GatewayEvent, GatewayReply, classify};
pub use session::Session;
pub use traits::PromptDriver;
