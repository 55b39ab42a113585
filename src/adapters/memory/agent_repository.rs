//! In-memory agent repository adapter.
//!
//! Stores agent profiles in a process-local map. This is the default
//! store for development and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::agent::AgentProfile;
use crate::domain::foundation::{AgentId, DomainError};
use crate::ports::AgentRepository;

/// In-memory store for agent profiles.
#[derive(Debug, Clone)]
pub struct InMemoryAgentRepository {
    agents: Arc<RwLock<HashMap<AgentId, AgentProfile>>>,
}

impl InMemoryAgentRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self {
            agents: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all stored agents (useful for tests).
    pub async fn clear(&self) {
        self.agents.write().await.clear();
    }

    /// Get the number of stored agents.
    pub async fn count(&self) -> usize {
        self.agents.read().await.len()
    }
}

impl Default for InMemoryAgentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentRepository for InMemoryAgentRepository {
    async fn save(&self, agent: &AgentProfile) -> Result<(), DomainError> {
        let mut agents = self.agents.write().await;
        agents.insert(*agent.id(), agent.clone());
        Ok(())
    }

    async fn update(&self, agent: &AgentProfile) -> Result<(), DomainError> {
        let mut agents = self.agents.write().await;
        if !agents.contains_key(agent.id()) {
            return Err(DomainError::agent_not_found(agent.id()));
        }
        agents.insert(*agent.id(), agent.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AgentId) -> Result<Option<AgentProfile>, DomainError> {
        let agents = self.agents.read().await;
        Ok(agents.get(id).cloned())
    }
}
