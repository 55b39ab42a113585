//! SessionStatus enum for tracking lifecycle of conversation sessions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a conversation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Active,
    Completed,
    Archived,
}

impl SessionStatus {
    /// Returns true if the session can still receive messages.
    pub fn is_mutable(&self) -> bool {
        matches!(self, SessionStatus::Active)
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions:
    /// - Active -> Completed
    /// - Active -> Archived
    /// - Completed -> Archived
    pub fn can_transition_to(&self, target: &SessionStatus) -> bool {
        use SessionStatus::*;
        matches!(
            (self, target),
            (Active, Completed) | (Active, Archived) | (Completed, Archived)
        )
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Active => "Active",
            SessionStatus::Completed => "Completed",
            SessionStatus::Archived => "Archived",
        };
        write!(f, "{}", s)
    }
}
