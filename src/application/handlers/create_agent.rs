//! Agent creation command handler.
//!
//! Validates persona tags and configuration, persists the profile, then
//! registers it with the external registry side-channel. Registration is
//! best-effort: its outcome only moves the profile's registration status,
//! the agent is usable either way.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::domain::agent::{AgentProfile, KnowledgeItem, Personality, ResponseStyle, Workflow};
use crate::domain::foundation::{AgentId, DomainError, ErrorCode, ValidationError};
use crate::ports::{AgentRegistry, AgentRepository, RegistrationRequest, RegistryError};

/// Command to create a new agent.
#[derive(Debug, Clone)]
pub struct CreateAgentCommand {
    /// Agent display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Personality tag; defaults to `professional` when unset.
    pub personality: Option<String>,
    /// Response-style tag; defaults to `helpful` when unset.
    pub response_style: Option<String>,
    /// Knowledge base entries.
    pub knowledge: Vec<KnowledgeEntry>,
    /// Workflow definitions.
    pub workflows: Vec<WorkflowEntry>,
}

/// Raw knowledge entry, validated during handling.
#[derive(Debug, Clone)]
pub struct KnowledgeEntry {
    pub topic: String,
    pub content: String,
}

/// Raw workflow entry, validated during handling.
#[derive(Debug, Clone)]
pub struct WorkflowEntry {
    pub name: String,
    pub steps: Vec<String>,
    pub triggers: Vec<String>,
}

impl CreateAgentCommand {
    /// Creates a command with only the required name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            personality: None,
            response_style: None,
            knowledge: Vec::new(),
            workflows: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the personality tag.
    pub fn with_personality(mut self, personality: impl Into<String>) -> Self {
        self.personality = Some(personality.into());
        self
    }

    /// Sets the response-style tag.
    pub fn with_response_style(mut self, response_style: impl Into<String>) -> Self {
        self.response_style = Some(response_style.into());
        self
    }

    /// Sets the knowledge base entries.
    pub fn with_knowledge(mut self, knowledge: Vec<KnowledgeEntry>) -> Self {
        self.knowledge = knowledge;
        self
    }

    /// Sets the workflow definitions.
    pub fn with_workflows(mut self, workflows: Vec<WorkflowEntry>) -> Self {
        self.workflows = workflows;
        self
    }
}

/// Errors that can occur when creating an agent.
#[derive(Debug, Clone, Error)]
pub enum CreateAgentError {
    /// A field failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A persona tag is outside the closed set.
    #[error("unknown persona tag: {0}")]
    InvalidPersona(String),

    /// Domain or persistence error.
    #[error("domain error: {0}")]
    Domain(String),
}

impl From<DomainError> for CreateAgentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                CreateAgentError::Validation(err.message)
            }
            _ => CreateAgentError::Domain(err.to_string()),
        }
    }
}

impl From<ValidationError> for CreateAgentError {
    fn from(err: ValidationError) -> Self {
        CreateAgentError::Validation(err.to_string())
    }
}

/// Result of a successful agent creation.
#[derive(Debug, Clone)]
pub struct CreateAgentResult {
    /// The created profile, including its registration status.
    pub agent: AgentProfile,
}

/// Handler for agent creation commands.
pub struct CreateAgentHandler<A, R>
where
    A: AgentRepository + ?Sized,
    R: AgentRegistry + ?Sized,
{
    agents: Arc<A>,
    registry: Arc<R>,
}

impl<A, R> CreateAgentHandler<A, R>
where
    A: AgentRepository + ?Sized,
    R: AgentRegistry + ?Sized,
{
    /// Creates a new handler.
    pub fn new(agents: Arc<A>, registry: Arc<R>) -> Self {
        Self { agents, registry }
    }

    /// Handles an agent creation command.
    pub async fn handle(
        &self,
        cmd: CreateAgentCommand,
    ) -> Result<CreateAgentResult, CreateAgentError> {
        let personality = parse_personality(cmd.personality.as_deref())?;
        let response_style = parse_response_style(cmd.response_style.as_deref())?;

        let mut knowledge = Vec::with_capacity(cmd.knowledge.len());
        for entry in cmd.knowledge {
            knowledge.push(KnowledgeItem::new(entry.topic, entry.content)?);
        }
        let mut workflows = Vec::with_capacity(cmd.workflows.len());
        for entry in cmd.workflows {
            workflows.push(Workflow::new(entry.name, entry.steps, entry.triggers)?);
        }

        let mut agent = AgentProfile::new(AgentId::new(), cmd.name)?;
        agent.update_description(cmd.description);
        agent.update_personality(personality);
        agent.update_response_style(response_style);
        agent.replace_knowledge(knowledge);
        agent.replace_workflows(workflows);

        self.agents.save(&agent).await?;

        let request =
            RegistrationRequest::new(*agent.id(), agent.name(), descriptor_digest(&agent));
        match self.registry.register(request).await {
            Ok(receipt) => {
                agent.confirm_registration(receipt.tx_hash);
                self.agents.update(&agent).await?;
            }
            // No registry configured: the profile simply stays unregistered.
            Err(RegistryError::Disabled) => {}
            Err(error) => {
                agent.mark_registration_pending();
                self.agents.update(&agent).await?;
                tracing::warn!(
                    agent_id = %agent.id(),
                    error = %error,
                    retryable = error.is_retryable(),
                    "agent registration failed"
                );
            }
        }

        tracing::info!(
            agent_id = %agent.id(),
            name = %agent.name(),
            registration = ?agent.registration(),
            "agent created"
        );

        Ok(CreateAgentResult { agent })
    }
}

fn parse_personality(tag: Option<&str>) -> Result<Personality, CreateAgentError> {
    match tag {
        Some(tag) => tag
            .parse()
            .map_err(|_| CreateAgentError::InvalidPersona(tag.to_string())),
        None => Ok(Personality::default()),
    }
}

fn parse_response_style(tag: Option<&str>) -> Result<ResponseStyle, CreateAgentError> {
    match tag {
        Some(tag) => tag
            .parse()
            .map_err(|_| CreateAgentError::InvalidPersona(tag.to_string())),
        None => Ok(ResponseStyle::default()),
    }
}

/// Hex-encoded SHA-256 digest of the agent's canonical descriptor.
fn descriptor_digest(agent: &AgentProfile) -> String {
    let descriptor = serde_json::json!({
        "name": agent.name(),
        "description": agent.description(),
        "personality": agent.personality(),
        "response_style": agent.response_style(),
    });
    let mut hasher = Sha256::new();
    hasher.update(descriptor.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}
