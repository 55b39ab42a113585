//! Agent registry configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Agent registry side-channel configuration
///
/// When no endpoint is configured the null registry adapter is wired in
/// and created agents stay unregistered.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    /// Ledger registry base URL
    pub endpoint: Option<String>,

    /// Registration request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl RegistryConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a registry endpoint is configured
    pub fn is_enabled(&self) -> bool {
        self.endpoint.as_ref().is_some_and(|e| !e.is_empty())
    }

    /// Validate registry configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ValidationError::InvalidRegistryEndpoint);
            }
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}
