//! HTTP agent registry adapter.
//!
//! Posts registrations to the external registry service, which owns the
//! ledger write and answers with the transaction reference.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpRegistryConfig::new("https://registry.internal")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let registry = HttpAgentRegistry::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{AgentRegistry, RegistrationReceipt, RegistrationRequest, RegistryError};

/// Configuration for the HTTP registry adapter.
#[derive(Debug, Clone)]
pub struct HttpRegistryConfig {
    /// Base URL of the registry service.
    pub endpoint: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpRegistryConfig {
    /// Creates a new configuration for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP implementation of the agent registry port.
pub struct HttpAgentRegistry {
    config: HttpRegistryConfig,
    client: Client,
}

impl HttpAgentRegistry {
    /// Creates a new registry client with the given configuration.
    pub fn new(config: HttpRegistryConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the registration endpoint URL.
    fn register_url(&self) -> String {
        format!("{}/agents", self.config.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl AgentRegistry for HttpAgentRegistry {
    async fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<RegistrationReceipt, RegistryError> {
        let body = RegisterRequestBody {
            agent_id: request.agent_id.to_string(),
            name: request.name,
            descriptor_digest: request.descriptor_digest,
        };

        let response = self
            .client
            .post(self.register_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    RegistryError::network(format!("Connection failed: {}", e))
                } else {
                    RegistryError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, error_body));
        }

        let receipt: RegisterResponseBody = response
            .json()
            .await
            .map_err(|e| RegistryError::parse(format!("Failed to parse response: {}", e)))?;

        Ok(RegistrationReceipt::new(receipt.tx_hash))
    }
}

/// Maps a non-success status to a registry error.
fn classify_failure(status: StatusCode, body: String) -> RegistryError {
    match status.as_u16() {
        400 | 409 | 422 => RegistryError::rejected(body),
        500..=599 => RegistryError::unavailable(format!("Server error {}: {}", status, body)),
        _ => RegistryError::network(format!("Unexpected status {}: {}", status, body)),
    }
}

// ----- Registry API Types -----

#[derive(Debug, Serialize)]
struct RegisterRequestBody {
    agent_id: String,
    name: String,
    descriptor_digest: String,
}

#[derive(Debug, Deserialize)]
struct RegisterResponseBody {
    tx_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_url_joins_without_double_slash() {
        let registry = HttpAgentRegistry::new(HttpRegistryConfig::new("https://registry.internal/"));
        assert_eq!(registry.register_url(), "https://registry.internal/agents");
    }

    #[test]
    fn request_body_serializes_snake_case() {
        let body = RegisterRequestBody {
            agent_id: "a-1".to_string(),
            name: "Nova".to_string(),
            descriptor_digest: "ab12".to_string(),
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["agent_id"], "a-1");
        assert_eq!(value["name"], "Nova");
        assert_eq!(value["descriptor_digest"], "ab12");
    }

    #[test]
    fn response_body_parses_tx_hash() {
        let parsed: RegisterResponseBody =
            serde_json::from_str(r#"{"tx_hash":"0xfeed"}"#).unwrap();
        assert_eq!(parsed.tx_hash, "0xfeed");
    }

    #[test]
    fn conflict_is_a_rejection() {
        let err = classify_failure(StatusCode::CONFLICT, "digest already registered".to_string());
        assert!(matches!(err, RegistryError::Rejected { .. }));
        assert!(!err.is_retryable());
    }

    #[test]
    fn server_errors_are_retryable() {
        let err = classify_failure(StatusCode::BAD_GATEWAY, "upstream down".to_string());
        assert!(matches!(err, RegistryError::Unavailable { .. }));
        assert!(err.is_retryable());
    }

    #[test]
    fn unexpected_status_is_a_network_error() {
        let err = classify_failure(StatusCode::FOUND, "".to_string());
        assert!(matches!(err, RegistryError::Network(_)));
    }
}
