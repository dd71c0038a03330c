//! Environment-sourced client configuration.

use std::env;

/// Environment variable naming the gateway base address.
pub const GATEWAY_URL_VAR: &str = "GATEWAY_URL";

/// Environment variable supplying the API key directly.
pub const GATEWAY_KEY_VAR: &str = "GATEWAY_KEY";

/// Address used when `GATEWAY_URL` is absent.
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:3000";

/// Client configuration read once at startup.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Raw gateway address; normalized by `GatewayAddress::new`.
    pub gateway_url: String,
}

impl ClientConfig {
    /// Read configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(env::var(GATEWAY_URL_VAR).ok())
    }

    fn from_lookup(gateway_url: Option<String>) -> Self {
        Self {
            gateway_url: gateway_url
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
        }
    }
}
