//! Session resolution and persistence.
//!
//! Implements the resolve-or-start half of the session lifecycle: an
//! existing active session for the (participant, agent) pair is reused,
//! otherwise a fresh one is constructed without being persisted. The
//! caller appends the turn's messages and then commits. Callers must hold
//! the per-pair turn lock across resolve and commit; the repository's
//! insert-time uniqueness check is the second line of defense.

use std::sync::Arc;

use crate::domain::conversation::ConversationSession;
use crate::domain::foundation::{AgentId, DomainError, ParticipantId};
use crate::ports::SessionRepository;

/// A resolved session plus how it was obtained.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    /// The active session for the pair.
    pub session: ConversationSession,
    /// True when the session was freshly started and not yet persisted.
    pub is_new: bool,
}

/// Resolve-or-start service over the session repository.
pub struct SessionStore<S: ?Sized> {
    sessions: Arc<S>,
}

impl<S> SessionStore<S>
where
    S: SessionRepository + ?Sized,
{
    /// Creates a new store.
    pub fn new(sessions: Arc<S>) -> Self {
        Self { sessions }
    }

    /// Returns the pair's active session, starting a new one if none
    /// exists. A started session is not persisted until [`commit`].
    ///
    /// [`commit`]: SessionStore::commit
    pub async fn resolve_session(
        &self,
        participant_id: &ParticipantId,
        agent_id: &AgentId,
    ) -> Result<ResolvedSession, DomainError> {
        match self
            .sessions
            .find_active_by_pair(participant_id, agent_id)
            .await?
        {
            Some(session) => Ok(ResolvedSession {
                session,
                is_new: false,
            }),
            None => Ok(ResolvedSession {
                session: ConversationSession::start(participant_id.clone(), *agent_id),
                is_new: true,
            }),
        }
    }

    /// Persists a resolved session, inserting or updating as appropriate.
    pub async fn commit(&self, resolved: &ResolvedSession) -> Result<(), DomainError> {
        if resolved.is_new {
            self.sessions.save(&resolved.session).await
        } else {
            self.sessions.update(&resolved.session).await
        }
    }
}
