//! Conversation history query handler.
//!
//! Returns the active session's transcript for a participant/agent pair.
//! A pair with no active session yields an empty transcript, not an
//! error; a deactivated agent still serves its history.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::conversation::Message;
use crate::domain::foundation::{AgentId, DomainError, ParticipantId, SessionToken};
use crate::ports::{AgentRepository, SessionRepository};

/// Query for a pair's conversation history.
#[derive(Debug, Clone)]
pub struct GetConversationQuery {
    /// The agent side of the pair.
    pub agent_id: AgentId,
    /// The participant side of the pair.
    pub participant_id: ParticipantId,
}

impl GetConversationQuery {
    /// Creates a new conversation query.
    pub fn new(agent_id: AgentId, participant_id: ParticipantId) -> Self {
        Self {
            agent_id,
            participant_id,
        }
    }
}

/// Errors that can occur when querying a conversation.
#[derive(Debug, Clone, Error)]
pub enum GetConversationError {
    /// Agent was not found.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),

    /// Domain or persistence error.
    #[error("domain error: {0}")]
    Domain(String),
}

impl From<DomainError> for GetConversationError {
    fn from(err: DomainError) -> Self {
        GetConversationError::Domain(err.to_string())
    }
}

/// A pair's conversation transcript.
#[derive(Debug, Clone)]
pub struct ConversationView {
    /// Token of the active session, when one exists.
    pub session_token: Option<SessionToken>,
    /// Messages in append order; empty when no session is active.
    pub messages: Vec<Message>,
}

/// Handler for conversation history queries.
pub struct GetConversationHandler<A, S>
where
    A: AgentRepository + ?Sized,
    S: SessionRepository + ?Sized,
{
    agents: Arc<A>,
    sessions: Arc<S>,
}

impl<A, S> GetConversationHandler<A, S>
where
    A: AgentRepository + ?Sized,
    S: SessionRepository + ?Sized,
{
    /// Creates a new handler.
    pub fn new(agents: Arc<A>, sessions: Arc<S>) -> Self {
        Self { agents, sessions }
    }

    /// Handles a conversation history query.
    pub async fn handle(
        &self,
        query: GetConversationQuery,
    ) -> Result<ConversationView, GetConversationError> {
        self.agents
            .find_by_id(&query.agent_id)
            .await?
            .ok_or(GetConversationError::AgentNotFound(query.agent_id))?;

        let session = self
            .sessions
            .find_active_by_pair(&query.participant_id, &query.agent_id)
            .await?;

        Ok(match session {
            Some(session) => ConversationView {
                session_token: Some(*session.token()),
                messages: session.messages().to_vec(),
            },
            None => ConversationView {
                session_token: None,
                messages: Vec::new(),
            },
        })
    }
}
