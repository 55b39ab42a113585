//! Session repository port.
//!
//! Contract for persisting and retrieving [`ConversationSession`]
//! aggregates.
//!
//! # Design
//!
//! - **Pair-scoped**: the primary lookup is by (participant, agent) pair
//! - **Uniqueness at insert**: `save` is where the one-active-session-per-
//!   pair invariant is enforced; callers additionally serialize per pair
//!   so resolve-then-save cannot interleave

use crate::domain::conversation::ConversationSession;
use crate::domain::foundation::{AgentId, DomainError, ParticipantId};
use async_trait::async_trait;

/// Repository port for ConversationSession persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `DUPLICATE_ACTIVE_SESSION` if an active session already exists
    ///   for the same (participant, agent) pair
    /// - `STORAGE_ERROR` on persistence failure
    async fn save(&self, session: &ConversationSession) -> Result<(), DomainError>;

    /// Update an existing session.
    ///
    /// # Errors
    ///
    /// - `SESSION_NOT_FOUND` if the session doesn't exist
    /// - `STORAGE_ERROR` on persistence failure
    async fn update(&self, session: &ConversationSession) -> Result<(), DomainError>;

    /// Find the active session for a (participant, agent) pair.
    ///
    /// Returns `None` if the pair has no active session. Completed and
    /// archived sessions are never returned.
    async fn find_active_by_pair(
        &self,
        participant_id: &ParticipantId,
        agent_id: &AgentId,
    ) -> Result<Option<ConversationSession>, DomainError>;
}
