//! Participant directory port.
//!
//! Read-only lookup of participant identity details used for reply
//! personalization. The directory is an opaque collaborator; a missing
//! entry is a normal outcome, not an error, and never blocks a turn.

use crate::domain::foundation::{DomainError, ParticipantId};
use crate::domain::orchestration::ParticipantProfile;
use async_trait::async_trait;

/// Directory port for participant identity lookup.
#[async_trait]
pub trait ParticipantDirectory: Send + Sync {
    /// Look up a participant's profile.
    ///
    /// Returns `None` for unknown participants.
    async fn lookup(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<Option<ParticipantProfile>, DomainError>;
}
