//! Message entity for conversation sessions.
//!
//! Messages are immutable records of participant/agent exchanges. Agent
//! messages carry turn metadata (latency, confidence, intent); participant
//! messages never do.

use crate::domain::foundation::{DomainError, Intent, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a message within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(Uuid);

impl MessageId {
    /// Creates a new random MessageId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a MessageId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MessageId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The onboarding participant.
    Participant,
    /// The agent's generated reply.
    Agent,
}

/// Turn metadata attached to agent-authored messages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MessageMetadata {
    /// Elapsed generation latency in milliseconds.
    pub response_time_ms: u64,
    /// Confidence score in [0.0, 1.0].
    pub confidence: f64,
    /// Intent detected for the triggering message.
    pub intent: Intent,
}

impl MessageMetadata {
    /// Creates turn metadata.
    pub fn new(response_time_ms: u64, confidence: f64, intent: Intent) -> Self {
        Self {
            response_time_ms,
            confidence,
            intent,
        }
    }
}

/// An immutable message within a session.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `content` is non-empty (validated at construction)
/// - `metadata` is present exactly when the sender is the agent
/// - `created_at` is set at construction and never changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for this message.
    id: MessageId,

    /// Who authored the message.
    sender: Sender,

    /// The text content.
    content: String,

    /// When the message was created.
    created_at: Timestamp,

    /// Turn metadata, agent messages only.
    metadata: Option<MessageMetadata>,
}

impl Message {
    /// Creates a participant message.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is empty
    pub fn from_participant(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        Self::validate_content(&content)?;

        Ok(Self {
            id: MessageId::new(),
            sender: Sender::Participant,
            content,
            created_at: Timestamp::now(),
            metadata: None,
        })
    }

    /// Creates an agent message with turn metadata.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if content is empty
    pub fn from_agent(
        content: impl Into<String>,
        metadata: MessageMetadata,
    ) -> Result<Self, DomainError> {
        let content = content.into();
        Self::validate_content(&content)?;

        Ok(Self {
            id: MessageId::new(),
            sender: Sender::Agent,
            content,
            created_at: Timestamp::now(),
            metadata: Some(metadata),
        })
    }

    /// Reconstitutes a message from persistence (no validation).
    pub fn reconstitute(
        id: MessageId,
        sender: Sender,
        content: String,
        created_at: Timestamp,
        metadata: Option<MessageMetadata>,
    ) -> Self {
        Self {
            id,
            sender,
            content,
            created_at,
            metadata,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the message ID.
    pub fn id(&self) -> &MessageId {
        &self.id
    }

    /// Returns the sender.
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Returns the content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the message was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns the turn metadata, agent messages only.
    pub fn metadata(&self) -> Option<&MessageMetadata> {
        self.metadata.as_ref()
    }

    /// Returns true if the participant authored this message.
    pub fn is_participant(&self) -> bool {
        self.sender == Sender::Participant
    }

    /// Returns true if the agent authored this message.
    pub fn is_agent(&self) -> bool {
        self.sender == Sender::Agent
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn validate_content(content: &str) -> Result<(), DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::validation(
                "content",
                "Message content cannot be empty",
            ));
        }
        Ok(())
    }
}
