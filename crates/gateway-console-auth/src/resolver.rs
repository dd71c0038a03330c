//! Credential resolution chain.

use std::env;
use std::time::Duration;

use gateway_console_core::Credentials;
use tokio::process::Command;
use tokio::time::timeout;

use crate::config::GATEWAY_KEY_VAR;

/// Bound on one secret manager CLI invocation.
pub const SECRET_TOOL_TIMEOUT: Duration = Duration::from_secs(10);

/// Secret name requested from the secret manager.
const SECRET_NAME: &str = "gateway-api-key";

/// Built-in key used when no other source yields one.
///
/// Known weakness: this is an embedded credential, kept for drop-in
/// compatibility with deployments that rely on it. See DESIGN.md.
const FALLBACK_API_KEY: &str =
    "a44c72cf24f7dcd1012bf8e7a2693b9c7385981cede7b95699fc4249285fb2ff";

/// Resolves the API key used by every transport.
///
/// The chain is total: environment variable, then the secret manager CLI,
/// then the built-in fallback. Resolution runs once at startup, before any
/// interactive loop, and never fails.
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    env_var: String,
    tool_program: String,
    tool_args: Vec<String>,
}

impl CredentialResolver {
    /// Create a resolver with the default sources.
    #[must_use]
    pub fn new() -> Self {
        Self {
            env_var: GATEWAY_KEY_VAR.to_string(),
            tool_program: "gcloud".to_string(),
            tool_args: vec![
                "secrets".to_string(),
                "versions".to_string(),
                "access".to_string(),
                "latest".to_string(),
                format!("--secret={SECRET_NAME}"),
            ],
        }
    }

    /// Override the environment variable consulted first.
    #[must_use]
    pub fn env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = name.into();
        self
    }

    /// Override the secret manager command.
    #[must_use]
    pub fn tool_command<I>(mut self, program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.tool_program = program.into();
        self.tool_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Resolve credentials, first source wins.
    pub async fn resolve(&self) -> Credentials {
        self.resolve_from(env::var(&self.env_var).ok()).await
    }

    async fn resolve_from(&self, env_key: Option<String>) -> Credentials {
        if let Some(key) = env_key.filter(|key| !key.is_empty()) {
            tracing::debug!(var = %self.env_var, "API key taken from environment");
            return Credentials::new(key);
        }

        if let Some(key) = self.from_secret_tool().await {
            tracing::info!("API key obtained from secret manager");
            return Credentials::new(key);
        }

        tracing::warn!("no credential source succeeded, using built-in key");
        Credentials::new(FALLBACK_API_KEY)
    }

    /// Ask the secret manager CLI for the key.
    ///
    /// Any failure mode — missing binary, non-zero exit, empty output,
    /// timeout — falls through to the next source.
    async fn from_secret_tool(&self) -> Option<String> {
        let invocation = Command::new(&self.tool_program)
            .args(&self.tool_args)
            .kill_on_drop(true)
            .output();

        match timeout(SECRET_TOOL_TIMEOUT, invocation).await {
            Ok(Ok(output)) if output.status.success() => {
                let key = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if key.is_empty() {
                    tracing::debug!("secret tool succeeded but printed nothing");
                    None
                } else {
                    Some(key)
                }
            }
            Ok(Ok(output)) => {
                tracing::debug!(code = ?output.status.code(), "secret tool exited with failure");
                None
            }
            Ok(Err(e)) => {
                tracing::debug!("secret tool could not be spawned: {e}");
                None
            }
            Err(_) => {
                tracing::warn!(
                    "secret tool did not finish within {SECRET_TOOL_TIMEOUT:?}"
                );
                None
            }
        }
    }
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::new()
    }
}
