//! Agent deactivation command handler.
//!
//! Deactivation is a soft delete: the profile and its sessions stay
//! stored, but new turns are rejected until the agent is reactivated.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{AgentId, DomainError, ErrorCode};
use crate::ports::AgentRepository;

/// Command to deactivate an agent.
#[derive(Debug, Clone)]
pub struct DeactivateAgentCommand {
    /// The agent to deactivate.
    pub agent_id: AgentId,
}

impl DeactivateAgentCommand {
    /// Creates a new deactivation command.
    pub fn new(agent_id: AgentId) -> Self {
        Self { agent_id }
    }
}

/// Errors that can occur when deactivating an agent.
#[derive(Debug, Clone, Error)]
pub enum DeactivateAgentError {
    /// Agent was not found.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),

    /// Agent is already inactive.
    #[error("agent {0} is already inactive")]
    AlreadyInactive(AgentId),

    /// Domain or persistence error.
    #[error("domain error: {0}")]
    Domain(String),
}

impl From<DomainError> for DeactivateAgentError {
    fn from(err: DomainError) -> Self {
        DeactivateAgentError::Domain(err.to_string())
    }
}

/// Result of a successful deactivation.
#[derive(Debug, Clone)]
pub struct DeactivateAgentResult {
    /// The deactivated agent.
    pub agent_id: AgentId,
    /// Its display name, for confirmation messages.
    pub name: String,
}

/// Handler for agent deactivation commands.
pub struct DeactivateAgentHandler<A>
where
    A: AgentRepository + ?Sized,
{
    agents: Arc<A>,
}

impl<A> DeactivateAgentHandler<A>
where
    A: AgentRepository + ?Sized,
{
    /// Creates a new handler.
    pub fn new(agents: Arc<A>) -> Self {
        Self { agents }
    }

    /// Handles a deactivation command.
    pub async fn handle(
        &self,
        cmd: DeactivateAgentCommand,
    ) -> Result<DeactivateAgentResult, DeactivateAgentError> {
        let mut agent = self
            .agents
            .find_by_id(&cmd.agent_id)
            .await?
            .ok_or(DeactivateAgentError::AgentNotFound(cmd.agent_id))?;

        agent.deactivate().map_err(|err| {
            if err.code == ErrorCode::InvalidStateTransition {
                DeactivateAgentError::AlreadyInactive(cmd.agent_id)
            } else {
                DeactivateAgentError::from(err)
            }
        })?;
        self.agents.update(&agent).await?;

        tracing::info!(agent_id = %cmd.agent_id, name = %agent.name(), "agent deactivated");

        Ok(DeactivateAgentResult {
            agent_id: cmd.agent_id,
            name: agent.name().to_string(),
        })
    }
}
