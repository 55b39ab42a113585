//! In-memory session repository adapter.
//!
//! Stores conversation sessions keyed by token. Insertion enforces the
//! one-active-session-per-pair invariant so a racing second writer gets
//! a conflict instead of splitting the pair's history.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::ConversationSession;
use crate::domain::foundation::{AgentId, DomainError, ErrorCode, ParticipantId, SessionToken};
use crate::ports::SessionRepository;

/// In-memory store for conversation sessions.
#[derive(Debug, Clone)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<SessionToken, ConversationSession>>>,
}

impl InMemorySessionRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all stored sessions (useful for tests).
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }

    /// Get the number of stored sessions.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: &ConversationSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;

        if session.is_active() {
            let duplicate = sessions.values().any(|existing| {
                existing.is_active()
                    && existing.participant_id() == session.participant_id()
                    && existing.agent_id() == session.agent_id()
            });
            if duplicate {
                return Err(DomainError::new(
                    ErrorCode::DuplicateActiveSession,
                    format!(
                        "Active session already exists for participant {} and agent {}",
                        session.participant_id(),
                        session.agent_id()
                    ),
                ));
            }
        }

        sessions.insert(*session.token(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &ConversationSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        if !sessions.contains_key(session.token()) {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Session {} not found", session.token()),
            ));
        }
        sessions.insert(*session.token(), session.clone());
        Ok(())
    }

    async fn find_active_by_pair(
        &self,
        participant_id: &ParticipantId,
        agent_id: &AgentId,
    ) -> Result<Option<ConversationSession>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .values()
            .find(|session| {
                session.is_active()
                    && session.participant_id() == participant_id
                    && session.agent_id() == agent_id
            })
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant_id() -> ParticipantId {
        ParticipantId::new("emp-42").unwrap()
    }

    #[tokio::test]
    async fn save_and_find_active_round_trips() {
        let repo = InMemorySessionRepository::new();
        let agent_id = AgentId::new();
        let session = ConversationSession::start(participant_id(), agent_id);

        repo.save(&session).await.unwrap();

        let found = repo
            .find_active_by_pair(&participant_id(), &agent_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.token(), session.token());
    }

    #[tokio::test]
    async fn rejects_a_second_active_session_for_the_same_pair() {
        let repo = InMemorySessionRepository::new();
        let agent_id = AgentId::new();

        repo.save(&ConversationSession::start(participant_id(), agent_id))
            .await
            .unwrap();
        let result = repo
            .save(&ConversationSession::start(participant_id(), agent_id))
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateActiveSession);
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn different_pairs_can_each_have_an_active_session() {
        let repo = InMemorySessionRepository::new();
        let agent_a = AgentId::new();
        let agent_b = AgentId::new();

        repo.save(&ConversationSession::start(participant_id(), agent_a))
            .await
            .unwrap();
        repo.save(&ConversationSession::start(participant_id(), agent_b))
            .await
            .unwrap();

        assert_eq!(repo.count().await, 2);
        assert!(repo
            .find_active_by_pair(&participant_id(), &agent_a)
            .await
            .unwrap()
            .is_some());
        assert!(repo
            .find_active_by_pair(&participant_id(), &agent_b)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn update_replaces_the_stored_session() {
        let repo = InMemorySessionRepository::new();
        let agent_id = AgentId::new();
        let mut session = ConversationSession::start(participant_id(), agent_id);
        repo.save(&session).await.unwrap();

        session.complete().unwrap();
        repo.update(&session).await.unwrap();

        let active = repo
            .find_active_by_pair(&participant_id(), &agent_id)
            .await
            .unwrap();
        assert!(active.is_none());
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn update_rejects_an_unknown_session() {
        let repo = InMemorySessionRepository::new();
        let session = ConversationSession::start(participant_id(), AgentId::new());

        let result = repo.update(&session).await;

        let err = result.unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn closed_pair_accepts_a_fresh_active_session() {
        let repo = InMemorySessionRepository::new();
        let agent_id = AgentId::new();
        let mut first = ConversationSession::start(participant_id(), agent_id);
        repo.save(&first).await.unwrap();

        first.complete().unwrap();
        repo.update(&first).await.unwrap();

        let second = ConversationSession::start(participant_id(), agent_id);
        repo.save(&second).await.unwrap();

        let active = repo
            .find_active_by_pair(&participant_id(), &agent_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(active.token(), second.token());
    }
}
