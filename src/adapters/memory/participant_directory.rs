//! In-memory participant directory adapter.
//!
//! Holds the participant profiles used for reply personalization. In a
//! full deployment this would front the HR directory; here it is seeded
//! at startup or by tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ParticipantId};
use crate::domain::orchestration::ParticipantProfile;
use crate::ports::ParticipantDirectory;

/// In-memory participant directory.
#[derive(Debug, Clone)]
pub struct InMemoryParticipantDirectory {
    profiles: Arc<RwLock<HashMap<ParticipantId, ParticipantProfile>>>,
}

impl InMemoryParticipantDirectory {
    /// Create a new empty directory.
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert or replace a profile.
    pub async fn insert(&self, profile: ParticipantProfile) {
        self.profiles.write().await.insert(profile.id.clone(), profile);
    }

    /// Get the number of stored profiles.
    pub async fn count(&self) -> usize {
        self.profiles.read().await.len()
    }
}

impl Default for InMemoryParticipantDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ParticipantDirectory for InMemoryParticipantDirectory {
    async fn lookup(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<Option<ParticipantProfile>, DomainError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(participant_id).cloned())
    }
}
