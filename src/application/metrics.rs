//! Per-agent interaction metrics accumulation.
//!
//! Folds one completed turn into the owning agent's running metrics as an
//! explicit read-modify-write against the agent repository. Writes for
//! the same agent are serialized through a per-agent lock so concurrent
//! turns across different participants cannot lose updates; different
//! agents fold in parallel.

use std::sync::Arc;

use crate::application::turn_locks::KeyedLocks;
use crate::domain::agent::AgentMetrics;
use crate::domain::foundation::{AgentId, DomainError};
use crate::ports::AgentRepository;

/// Serialized read-modify-write of agent metrics.
pub struct MetricsAccumulator<R: ?Sized> {
    agents: Arc<R>,
    agent_locks: KeyedLocks<AgentId>,
}

impl<R> MetricsAccumulator<R>
where
    R: AgentRepository + ?Sized,
{
    /// Creates a new accumulator over the agent repository.
    pub fn new(agents: Arc<R>) -> Self {
        Self {
            agents,
            agent_locks: KeyedLocks::new(),
        }
    }

    /// Records one served interaction, fallback turns included.
    ///
    /// Returns the metrics as persisted. The update applies the two-point
    /// running-average recurrence defined on [`AgentMetrics`].
    pub async fn record_interaction(
        &self,
        agent_id: &AgentId,
        latency_ms: u64,
    ) -> Result<AgentMetrics, DomainError> {
        let _guard = self.agent_locks.acquire(*agent_id).await;

        let mut agent = self
            .agents
            .find_by_id(agent_id)
            .await?
            .ok_or_else(|| DomainError::agent_not_found(agent_id))?;

        let updated = agent.metrics().record_interaction(latency_ms);
        agent.apply_metrics(updated);
        self.agents.update(&agent).await?;

        tracing::debug!(
            agent_id = %agent_id,
            total_interactions = updated.total_interactions(),
            average_response_time_ms = updated.average_response_time_ms(),
            "folded interaction into agent metrics"
        );
        Ok(updated)
    }
}
