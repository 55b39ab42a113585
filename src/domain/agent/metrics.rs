//! Rolling interaction metrics for an agent profile.

use serde::{Deserialize, Serialize};

/// Interaction counters reported to agent owners.
///
/// The average is a two-point running average, not a weighted mean over all
/// samples: each interaction folds in as `(old_average + latency) / 2`.
/// Owner-facing dashboards depend on this exact recurrence, so it must not
/// be replaced with a cumulative mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct AgentMetrics {
    total_interactions: u64,
    average_response_time_ms: f64,
    satisfaction_score: f64,
}

impl AgentMetrics {
    /// Creates zeroed metrics for a new agent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstitutes metrics from persistence.
    pub fn reconstitute(
        total_interactions: u64,
        average_response_time_ms: f64,
        satisfaction_score: f64,
    ) -> Self {
        Self {
            total_interactions,
            average_response_time_ms,
            satisfaction_score,
        }
    }

    /// Returns the total number of served interactions.
    pub fn total_interactions(&self) -> u64 {
        self.total_interactions
    }

    /// Returns the running-average response time in milliseconds.
    pub fn average_response_time_ms(&self) -> f64 {
        self.average_response_time_ms
    }

    /// Returns the satisfaction score.
    ///
    /// Carried and persisted, but no pipeline step mutates it.
    pub fn satisfaction_score(&self) -> f64 {
        self.satisfaction_score
    }

    /// Folds one served interaction into the counters.
    ///
    /// Fallback-reply turns count too: the agent still served the turn.
    pub fn record_interaction(&self, latency_ms: u64) -> Self {
        Self {
            total_interactions: self.total_interactions + 1,
            average_response_time_ms: (self.average_response_time_ms + latency_ms as f64) / 2.0,
            satisfaction_score: self.satisfaction_score,
        }
    }
}
