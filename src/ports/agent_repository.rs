//! Agent repository port.
//!
//! Contract for persisting and retrieving [`AgentProfile`] aggregates.
//!
//! # Design
//!
//! - **Write-focused**: save/update carry the whole aggregate
//! - **Metrics writes flow through here**: the metrics accumulator performs
//!   its read-modify-write via `find_by_id` + `update` under a per-agent
//!   serialization scope owned by the caller

use crate::domain::agent::AgentProfile;
use crate::domain::foundation::{AgentId, DomainError};
use async_trait::async_trait;

/// Repository port for AgentProfile persistence.
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Save a new agent.
    ///
    /// # Errors
    ///
    /// - `STORAGE_ERROR` on persistence failure
    async fn save(&self, agent: &AgentProfile) -> Result<(), DomainError>;

    /// Update an existing agent.
    ///
    /// # Errors
    ///
    /// - `AGENT_NOT_FOUND` if the agent doesn't exist
    /// - `STORAGE_ERROR` on persistence failure
    async fn update(&self, agent: &AgentProfile) -> Result<(), DomainError>;

    /// Find an agent by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &AgentId) -> Result<Option<AgentProfile>, DomainError>;
}
