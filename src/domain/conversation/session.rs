//! Conversation session aggregate entity.
//!
//! A session is the durable, append-only exchange between exactly one
//! participant and one agent. At most one session per (participant, agent)
//! pair may be active at a time; the repository and the per-pair turn lock
//! enforce that jointly.

use crate::domain::foundation::{
    AgentId, DomainError, ErrorCode, ParticipantId, SessionStatus, SessionToken, Timestamp,
};
use serde::{Deserialize, Serialize};

use super::message::Message;

/// Number of trailing messages supplied to the orchestrator as context.
pub const HISTORY_WINDOW: usize = 10;

/// Session aggregate - ordered message history for one participant/agent pair.
///
/// # Invariants
///
/// - `token` is globally unique
/// - messages are append-only: never reordered, never deleted
/// - only Active sessions accept appends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSession {
    /// Unique session token.
    token: SessionToken,

    /// The participant side of the exchange.
    participant_id: ParticipantId,

    /// The agent side of the exchange.
    agent_id: AgentId,

    /// Ordered, append-only message sequence.
    messages: Vec<Message>,

    /// Current lifecycle status.
    status: SessionStatus,

    /// When the session was created.
    created_at: Timestamp,

    /// When the session was last updated.
    updated_at: Timestamp,
}

impl ConversationSession {
    /// Start a new active session with a fresh token and no messages.
    pub fn start(participant_id: ParticipantId, agent_id: AgentId) -> Self {
        let now = Timestamp::now();
        Self {
            token: SessionToken::new(),
            participant_id,
            agent_id,
            messages: Vec::new(),
            status: SessionStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitute a session from persistence (no validation, no events).
    pub fn reconstitute(
        token: SessionToken,
        participant_id: ParticipantId,
        agent_id: AgentId,
        messages: Vec<Message>,
        status: SessionStatus,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            token,
            participant_id,
            agent_id,
            messages,
            status,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the session token.
    pub fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Returns the participant ID.
    pub fn participant_id(&self) -> &ParticipantId {
        &self.participant_id
    }

    /// Returns the agent ID.
    pub fn agent_id(&self) -> &AgentId {
        &self.agent_id
    }

    /// Returns all messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Returns the current status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Returns true if the session accepts new turns.
    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    /// Returns when the session was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the session was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns the trailing context window: the last `HISTORY_WINDOW`
    /// messages, oldest first.
    pub fn recent_history(&self) -> &[Message] {
        let start = self.messages.len().saturating_sub(HISTORY_WINDOW);
        &self.messages[start..]
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a single message.
    ///
    /// # Errors
    ///
    /// - `SessionClosed` if the session is not active
    pub fn append_message(&mut self, message: Message) -> Result<(), DomainError> {
        self.ensure_mutable()?;

        self.messages.push(message);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Append one full turn: the participant message, then the agent reply.
    ///
    /// # Errors
    ///
    /// - `SessionClosed` if the session is not active
    /// - `ValidationFailed` if the messages are not (participant, agent)
    pub fn append_turn(
        &mut self,
        participant_message: Message,
        agent_message: Message,
    ) -> Result<(), DomainError> {
        self.ensure_mutable()?;

        if !participant_message.is_participant() {
            return Err(DomainError::validation(
                "participant_message",
                "First message of a turn must be participant-authored",
            ));
        }
        if !agent_message.is_agent() {
            return Err(DomainError::validation(
                "agent_message",
                "Second message of a turn must be agent-authored",
            ));
        }

        self.messages.push(participant_message);
        self.messages.push(agent_message);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Mark the session completed (administrative action).
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if not currently active
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.transition_to(SessionStatus::Completed)
    }

    /// Archive the session (administrative action).
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if already archived
    pub fn archive(&mut self) -> Result<(), DomainError> {
        self.transition_to(SessionStatus::Archived)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates that the session can receive messages.
    fn ensure_mutable(&self) -> Result<(), DomainError> {
        if self.status.is_mutable() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::SessionClosed,
                "Cannot append to a closed session",
            )
            .with_detail("status", self.status.to_string()))
        }
    }

    fn transition_to(&mut self, target: SessionStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(&target) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition session from {} to {}", self.status, target),
            ));
        }
        self.status = target;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::MessageMetadata;
    use crate::domain::foundation::Intent;

    fn test_participant() -> ParticipantId {
        ParticipantId::new("emp-123").unwrap()
    }

    fn test_session() -> ConversationSession {
        ConversationSession::start(test_participant(), AgentId::new())
    }

    fn participant_msg(text: &str) -> Message {
        Message::from_participant(text).unwrap()
    }

    fn agent_msg(text: &str) -> Message {
        Message::from_agent(text, MessageMetadata::new(100, 0.7, Intent::GeneralInquiry)).unwrap()
    }

    // Construction tests

    #[test]
    fn new_session_is_active_and_empty() {
        let session = test_session();
        assert_eq!(session.status(), SessionStatus::Active);
        assert!(session.is_active());
        assert_eq!(session.message_count(), 0);
    }

    #[test]
    fn new_sessions_have_unique_tokens() {
        let s1 = test_session();
        let s2 = test_session();
        assert_ne!(s1.token(), s2.token());
    }

    // Append tests

    #[test]
    fn append_message_preserves_order() {
        let mut session = test_session();
        session.append_message(participant_msg("first")).unwrap();
        session.append_message(agent_msg("second")).unwrap();

        let contents: Vec<&str> = session.messages().iter().map(|m| m.content()).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[test]
    fn append_turn_appends_participant_first() {
        let mut session = test_session();
        session
            .append_turn(participant_msg("question"), agent_msg("answer"))
            .unwrap();

        assert_eq!(session.message_count(), 2);
        assert!(session.messages()[0].is_participant());
        assert!(session.messages()[1].is_agent());
    }

    #[test]
    fn append_turn_rejects_swapped_senders() {
        let mut session = test_session();
        let result = session.append_turn(agent_msg("answer"), agent_msg("again"));
        assert!(result.is_err());
    }

    #[test]
    fn append_to_completed_session_fails() {
        let mut session = test_session();
        session.complete().unwrap();
        let result = session.append_message(participant_msg("late"));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::SessionClosed);
    }

    // History window tests

    #[test]
    fn recent_history_returns_all_when_short() {
        let mut session = test_session();
        session
            .append_turn(participant_msg("q1"), agent_msg("a1"))
            .unwrap();
        assert_eq!(session.recent_history().len(), 2);
    }

    #[test]
    fn recent_history_caps_at_window_oldest_first() {
        let mut session = test_session();
        for i in 0..8 {
            session
                .append_turn(
                    participant_msg(&format!("q{}", i)),
                    agent_msg(&format!("a{}", i)),
                )
                .unwrap();
        }
        assert_eq!(session.message_count(), 16);

        let history = session.recent_history();
        assert_eq!(history.len(), HISTORY_WINDOW);
        // 16 messages total; the window starts at q3.
        assert_eq!(history[0].content(), "q3");
        assert_eq!(history[9].content(), "a7");
    }

    // Lifecycle tests

    #[test]
    fn complete_then_archive_is_valid() {
        let mut session = test_session();
        session.complete().unwrap();
        session.archive().unwrap();
        assert_eq!(session.status(), SessionStatus::Archived);
    }

    #[test]
    fn archive_twice_fails() {
        let mut session = test_session();
        session.archive().unwrap();
        assert!(session.archive().is_err());
    }

    // Reconstitution tests

    #[test]
    fn reconstitute_preserves_all_fields() {
        let token = SessionToken::new();
        let agent_id = AgentId::new();
        let created = Timestamp::now();
        let messages = vec![participant_msg("hello")];

        let session = ConversationSession::reconstitute(
            token,
            test_participant(),
            agent_id,
            messages,
            SessionStatus::Completed,
            created,
            created,
        );

        assert_eq!(session.token(), &token);
        assert_eq!(session.agent_id(), &agent_id);
        assert_eq!(session.message_count(), 1);
        assert_eq!(session.status(), SessionStatus::Completed);
    }
}
