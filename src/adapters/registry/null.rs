//! Null agent registry adapter.
//!
//! Used when no registry endpoint is configured. Every registration
//! reports `Disabled`, which callers treat as "leave the agent
//! unregistered" rather than as a failure.

use async_trait::async_trait;

use crate::ports::{AgentRegistry, RegistrationReceipt, RegistrationRequest, RegistryError};

/// Registry adapter for deployments without a registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAgentRegistry;

impl NullAgentRegistry {
    /// Creates a new null registry.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AgentRegistry for NullAgentRegistry {
    async fn register(
        &self,
        _request: RegistrationRequest,
    ) -> Result<RegistrationReceipt, RegistryError> {
        Err(RegistryError::Disabled)
    }
}
