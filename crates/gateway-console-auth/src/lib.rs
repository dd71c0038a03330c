//! Credential resolution and client configuration.
//!
//! Provides:
//! - `ClientConfig` - Gateway address from the process environment
//! - `CredentialResolver` - Total env → secret manager → fallback chain

pub mod config;
pub mod resolver;

pub use config::ClientConfig;
pub use resolver::CredentialResolver;
