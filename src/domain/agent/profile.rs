//! Agent profile aggregate entity.
//!
//! An agent is one configured conversational persona: identity, voice tags,
//! knowledge base, workflow definitions, and rolling metrics.
//!
//! # Ownership
//!
//! Profiles do not own conversation sessions; sessions reference agents
//! by ID and are managed by the conversation module.

use crate::domain::foundation::{AgentId, DomainError, ErrorCode, Timestamp};
use serde::{Deserialize, Serialize};

use super::knowledge::{KnowledgeItem, Workflow};
use super::metrics::AgentMetrics;
use super::persona::{Personality, ResponseStyle};
use super::registration::RegistrationStatus;

/// Maximum length for agent display names.
pub const MAX_NAME_LENGTH: usize = 100;

/// Agent profile aggregate - one assistant instance.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `name` is 1-100 characters, non-empty
/// - persona tags come from their closed sets (enforced by the types)
/// - `metrics` is mutated only by the orchestration pipeline
/// - never hard-deleted; `active` flags soft removal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Unique identifier for this agent.
    id: AgentId,

    /// Display name.
    name: String,

    /// Optional free-text description.
    description: Option<String>,

    /// Personality tag.
    personality: Personality,

    /// Response-style tag.
    response_style: ResponseStyle,

    /// Ordered knowledge base entries.
    knowledge: Vec<KnowledgeItem>,

    /// Ordered workflow definitions.
    workflows: Vec<Workflow>,

    /// Whether this agent accepts new conversation turns.
    active: bool,

    /// Rolling interaction metrics.
    metrics: AgentMetrics,

    /// Ledger registration state.
    registration: RegistrationStatus,

    /// Transaction hash from the registration side-channel, when confirmed.
    registration_ref: Option<String>,

    /// When the profile was created.
    created_at: Timestamp,

    /// When the profile was last updated.
    updated_at: Timestamp,
}

impl AgentProfile {
    /// Create a new active agent with default persona tags.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if name is empty or too long
    pub fn new(id: AgentId, name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        Self::validate_name(&name)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            name,
            description: None,
            personality: Personality::default(),
            response_style: ResponseStyle::default(),
            knowledge: Vec::new(),
            workflows: Vec::new(),
            active: true,
            metrics: AgentMetrics::new(),
            registration: RegistrationStatus::Unregistered,
            registration_ref: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a profile from persistence (no validation, no events).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: AgentId,
        name: String,
        description: Option<String>,
        personality: Personality,
        response_style: ResponseStyle,
        knowledge: Vec<KnowledgeItem>,
        workflows: Vec<Workflow>,
        active: bool,
        metrics: AgentMetrics,
        registration: RegistrationStatus,
        registration_ref: Option<String>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            description,
            personality,
            response_style,
            knowledge,
            workflows,
            active,
            metrics,
            registration,
            registration_ref,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the agent ID.
    pub fn id(&self) -> &AgentId {
        &self.id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the personality tag.
    pub fn personality(&self) -> Personality {
        self.personality
    }

    /// Returns the response-style tag.
    pub fn response_style(&self) -> ResponseStyle {
        self.response_style
    }

    /// Returns the knowledge base entries in declared order.
    pub fn knowledge(&self) -> &[KnowledgeItem] {
        &self.knowledge
    }

    /// Returns the workflow definitions in declared order.
    pub fn workflows(&self) -> &[Workflow] {
        &self.workflows
    }

    /// Returns true if this agent accepts new turns.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the rolling metrics.
    pub fn metrics(&self) -> &AgentMetrics {
        &self.metrics
    }

    /// Returns the registration state.
    pub fn registration(&self) -> RegistrationStatus {
        self.registration
    }

    /// Returns the registration transaction hash, when confirmed.
    pub fn registration_ref(&self) -> Option<&str> {
        self.registration_ref.as_deref()
    }

    /// Returns when the profile was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the profile was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Guards
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates that this agent can serve a conversation turn.
    ///
    /// Registration state is deliberately not checked here: pending or
    /// unregistered agents still converse.
    ///
    /// # Errors
    ///
    /// - `AgentInactive` if the agent was deactivated
    pub fn ensure_active(&self) -> Result<(), DomainError> {
        if self.active {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::AgentInactive,
                "Agent has been deactivated",
            )
            .with_detail("agent_id", self.id.to_string()))
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Rename the agent.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if name is empty or too long
    pub fn rename(&mut self, new_name: String) -> Result<String, DomainError> {
        Self::validate_name(&new_name)?;

        let old_name = std::mem::replace(&mut self.name, new_name);
        self.updated_at = Timestamp::now();
        Ok(old_name)
    }

    /// Update the description.
    pub fn update_description(&mut self, description: Option<String>) -> Option<String> {
        let old = std::mem::replace(&mut self.description, description);
        self.updated_at = Timestamp::now();
        old
    }

    /// Update the personality tag.
    pub fn update_personality(&mut self, personality: Personality) {
        self.personality = personality;
        self.updated_at = Timestamp::now();
    }

    /// Update the response-style tag.
    pub fn update_response_style(&mut self, response_style: ResponseStyle) {
        self.response_style = response_style;
        self.updated_at = Timestamp::now();
    }

    /// Replace the knowledge base, preserving the given order.
    pub fn replace_knowledge(&mut self, knowledge: Vec<KnowledgeItem>) {
        self.knowledge = knowledge;
        self.updated_at = Timestamp::now();
    }

    /// Replace the workflow definitions, preserving the given order.
    pub fn replace_workflows(&mut self, workflows: Vec<Workflow>) {
        self.workflows = workflows;
        self.updated_at = Timestamp::now();
    }

    /// Record a confirmed registration from the side-channel.
    pub fn confirm_registration(&mut self, tx_hash: impl Into<String>) {
        self.registration = RegistrationStatus::Confirmed;
        self.registration_ref = Some(tx_hash.into());
        self.updated_at = Timestamp::now();
    }

    /// Record a failed registration attempt, to be retried out of band.
    pub fn mark_registration_pending(&mut self) {
        self.registration = RegistrationStatus::Pending;
        self.registration_ref = None;
        self.updated_at = Timestamp::now();
    }

    /// Write back metrics computed by the orchestration pipeline.
    ///
    /// The only legal writer is the metrics accumulator, under its
    /// per-agent lock.
    pub fn apply_metrics(&mut self, metrics: AgentMetrics) {
        self.metrics = metrics;
        self.updated_at = Timestamp::now();
    }

    /// Deactivate the agent (soft delete).
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if already inactive
    pub fn deactivate(&mut self) -> Result<(), DomainError> {
        if !self.active {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Agent is already inactive",
            ));
        }
        self.active = false;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Reactivate a previously deactivated agent.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if already active
    pub fn reactivate(&mut self) -> Result<(), DomainError> {
        if self.active {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Agent is already active",
            ));
        }
        self.active = true;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates the agent display name.
    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("name", "Name cannot be empty"));
        }
        if trimmed.len() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(
                "name",
                format!("Name must be {} characters or less", MAX_NAME_LENGTH),
            ));
        }
        Ok(())
    }
}
