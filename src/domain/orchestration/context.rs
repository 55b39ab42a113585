//! Turn context assembled by the application layer.

use crate::domain::conversation::{Message, HISTORY_WINDOW};
use crate::domain::foundation::ParticipantId;
use serde::{Deserialize, Serialize};

/// Directory read model for the participant side of a turn.
///
/// Supplied by the external participant directory; the pipeline only reads
/// the fields personalization needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantProfile {
    /// Directory identifier.
    pub id: ParticipantId,
    /// Given name, substituted into greetings.
    pub given_name: String,
    /// Declared department, when the directory has one.
    pub department: Option<String>,
}

impl ParticipantProfile {
    /// Creates a participant profile.
    pub fn new(id: ParticipantId, given_name: impl Into<String>) -> Self {
        Self {
            id,
            given_name: given_name.into(),
            department: None,
        }
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }
}

/// Context carried into one orchestrated turn.
///
/// The history is the session's trailing window (at most `HISTORY_WINDOW`
/// messages, oldest first), captured before the turn's own messages are
/// appended. The participant is absent when the directory has no record.
#[derive(Debug, Clone, Default)]
pub struct TurnContext {
    /// Participant identity, when known to the directory.
    pub participant: Option<ParticipantProfile>,
    /// Bounded prior-message window, oldest first.
    pub history: Vec<Message>,
}

impl TurnContext {
    /// Creates an empty context (unknown participant, no history).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the participant.
    pub fn with_participant(mut self, participant: ParticipantProfile) -> Self {
        self.participant = Some(participant);
        self
    }

    /// Sets the history window, keeping at most the trailing
    /// `HISTORY_WINDOW` messages.
    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        let start = history.len().saturating_sub(HISTORY_WINDOW);
        self.history = history[start..].to_vec();
        self
    }
}
