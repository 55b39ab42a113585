//! HTTP DTOs for agent endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{ChatResult, ConversationView, KnowledgeEntry, WorkflowEntry};
use crate::domain::agent::AgentProfile;
use crate::domain::conversation::{Message, Sender};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a new agent.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAgentRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub personality: Option<String>,
    #[serde(default)]
    pub response_style: Option<String>,
    #[serde(default)]
    pub knowledge: Vec<KnowledgeEntryRequest>,
    #[serde(default)]
    pub workflows: Vec<WorkflowEntryRequest>,
}

/// One knowledge item in a create request.
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeEntryRequest {
    pub topic: String,
    pub content: String,
}

impl From<KnowledgeEntryRequest> for KnowledgeEntry {
    fn from(req: KnowledgeEntryRequest) -> Self {
        Self {
            topic: req.topic,
            content: req.content,
        }
    }
}

/// One workflow definition in a create request.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowEntryRequest {
    pub name: String,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub triggers: Vec<String>,
}

impl From<WorkflowEntryRequest> for WorkflowEntry {
    fn from(req: WorkflowEntryRequest) -> Self {
        Self {
            name: req.name,
            steps: req.steps,
            triggers: req.triggers,
        }
    }
}

/// Request to run one conversation turn.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub participant_id: String,
    pub message: String,
}

/// Query parameters for conversation retrieval.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationQuery {
    pub participant_id: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Full agent view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct AgentResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub personality: String,
    pub response_style: String,
    pub knowledge: Vec<KnowledgeItemResponse>,
    pub workflows: Vec<WorkflowResponse>,
    pub is_active: bool,
    pub metrics: AgentMetricsResponse,
    pub registration_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_ref: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// One knowledge item in an agent response.
#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeItemResponse {
    pub topic: String,
    pub content: String,
}

/// One workflow in an agent response.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowResponse {
    pub name: String,
    pub steps: Vec<String>,
    pub triggers: Vec<String>,
}

/// Rolling metrics in an agent response.
#[derive(Debug, Clone, Serialize)]
pub struct AgentMetricsResponse {
    pub total_interactions: u64,
    pub average_response_time_ms: f64,
    pub satisfaction_score: f64,
}

impl From<AgentProfile> for AgentResponse {
    fn from(agent: AgentProfile) -> Self {
        Self {
            id: agent.id().to_string(),
            name: agent.name().to_string(),
            description: agent.description().map(String::from),
            personality: agent.personality().to_string(),
            response_style: agent.response_style().to_string(),
            knowledge: agent
                .knowledge()
                .iter()
                .map(|item| KnowledgeItemResponse {
                    topic: item.topic().to_string(),
                    content: item.content().to_string(),
                })
                .collect(),
            workflows: agent
                .workflows()
                .iter()
                .map(|workflow| WorkflowResponse {
                    name: workflow.name().to_string(),
                    steps: workflow.steps().to_vec(),
                    triggers: workflow.triggers().to_vec(),
                })
                .collect(),
            is_active: agent.is_active(),
            metrics: AgentMetricsResponse {
                total_interactions: agent.metrics().total_interactions(),
                average_response_time_ms: agent.metrics().average_response_time_ms(),
                satisfaction_score: agent.metrics().satisfaction_score(),
            },
            registration_status: agent.registration().to_string(),
            registration_ref: agent.registration_ref().map(String::from),
            created_at: agent.created_at().as_datetime().to_rfc3339(),
            updated_at: agent.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

/// Response for a completed conversation turn.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub session_token: String,
    pub reply: String,
    pub intent: String,
    pub confidence: f64,
    pub response_time_ms: u64,
    pub degraded: bool,
}

impl From<ChatResult> for ChatResponse {
    fn from(result: ChatResult) -> Self {
        Self {
            session_token: result.session_token.to_string(),
            reply: result.content,
            intent: result.intent.as_str().to_string(),
            confidence: result.confidence,
            response_time_ms: result.response_time_ms,
            degraded: result.degraded,
        }
    }
}

/// Conversation history for one (participant, agent) pair.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    pub messages: Vec<MessageResponse>,
}

/// One message in a conversation response.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub sender: String,
    pub content: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadataResponse>,
}

/// Turn metadata attached to agent messages.
#[derive(Debug, Clone, Serialize)]
pub struct MessageMetadataResponse {
    pub response_time_ms: u64,
    pub confidence: f64,
    pub intent: String,
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id().to_string(),
            sender: match message.sender() {
                Sender::Participant => "participant".to_string(),
                Sender::Agent => "agent".to_string(),
            },
            content: message.content().to_string(),
            created_at: message.created_at().as_datetime().to_rfc3339(),
            metadata: message.metadata().map(|meta| MessageMetadataResponse {
                response_time_ms: meta.response_time_ms,
                confidence: meta.confidence,
                intent: meta.intent.as_str().to_string(),
            }),
        }
    }
}

impl From<ConversationView> for ConversationResponse {
    fn from(view: ConversationView) -> Self {
        Self {
            session_token: view.session_token.map(|token| token.to_string()),
            messages: view.messages.iter().map(MessageResponse::from).collect(),
        }
    }
}

/// Response for agent deactivation.
#[derive(Debug, Clone, Serialize)]
pub struct DeactivateAgentResponse {
    pub agent_id: String,
    pub message: String,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
            details: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            code: "VALIDATION_FAILED".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            code: "CONFLICT".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}
