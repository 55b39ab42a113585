//! Agent registry port.
//!
//! Side-channel that records newly created agents with an external
//! registry service. Registration is best-effort: a failure downgrades
//! the agent's registration status, it never fails agent creation and
//! never gates conversation turns.

use async_trait::async_trait;

use crate::domain::foundation::AgentId;

/// Port for the external agent registry.
#[async_trait]
pub trait AgentRegistry: Send + Sync {
    /// Registers an agent with the external registry.
    ///
    /// # Errors
    ///
    /// - `Disabled` when no registry is configured
    /// - Any other [`RegistryError`] on rejection or transport failure
    async fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<RegistrationReceipt, RegistryError>;
}

/// Registration request payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    /// Agent being registered.
    pub agent_id: AgentId,
    /// Agent display name.
    pub name: String,
    /// Hex-encoded SHA-256 digest of the agent's descriptor.
    pub descriptor_digest: String,
}

impl RegistrationRequest {
    /// Creates a new registration request.
    pub fn new(
        agent_id: AgentId,
        name: impl Into<String>,
        descriptor_digest: impl Into<String>,
    ) -> Self {
        Self {
            agent_id,
            name: name.into(),
            descriptor_digest: descriptor_digest.into(),
        }
    }
}

/// Acknowledgment returned by a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationReceipt {
    /// Registry transaction reference.
    pub tx_hash: String,
}

impl RegistrationReceipt {
    /// Creates a new receipt.
    pub fn new(tx_hash: impl Into<String>) -> Self {
        Self {
            tx_hash: tx_hash.into(),
        }
    }
}

/// Agent registry errors.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No registry endpoint is configured.
    #[error("registry disabled")]
    Disabled,

    /// Registry rejected the registration.
    #[error("registration rejected: {reason}")]
    Rejected {
        /// Rejection details.
        reason: String,
    },

    /// Registry is unavailable.
    #[error("registry unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the registry response.
    #[error("parse error: {0}")]
    Parse(String),
}

impl RegistryError {
    /// Creates a rejected error.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if a later attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RegistryError::Unavailable { .. } | RegistryError::Network(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agent_registry_is_object_safe() {
        fn _accepts_dyn(_registry: &dyn AgentRegistry) {}
    }

    #[test]
    fn retryable_classification() {
        assert!(RegistryError::unavailable("down").is_retryable());
        assert!(RegistryError::network("reset").is_retryable());

        assert!(!RegistryError::Disabled.is_retryable());
        assert!(!RegistryError::rejected("duplicate digest").is_retryable());
        assert!(!RegistryError::parse("truncated body").is_retryable());
    }

    #[test]
    fn request_and_receipt_hold_their_fields() {
        let id = AgentId::new();
        let request = RegistrationRequest::new(id, "Nova", "ab12");
        assert_eq!(request.agent_id, id);
        assert_eq!(request.name, "Nova");
        assert_eq!(request.descriptor_digest, "ab12");

        let receipt = RegistrationReceipt::new("0xfeed");
        assert_eq!(receipt.tx_hash, "0xfeed");
    }
}
