//! HTTP handlers for agent endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::{
    ChatCommand, ChatError, ChatHandler, CreateAgentCommand, CreateAgentError, CreateAgentHandler,
    DeactivateAgentCommand, DeactivateAgentError, DeactivateAgentHandler, GetConversationError,
    GetConversationHandler, GetConversationQuery,
};
use crate::domain::foundation::{AgentId, ParticipantId};
use crate::ports::{
    AgentRegistry, AgentRepository, GenerationBackend, ParticipantDirectory, SessionRepository,
};

use super::dto::{
    AgentResponse, ChatRequest, ChatResponse, ConversationQuery, ConversationResponse,
    CreateAgentRequest, DeactivateAgentResponse, ErrorResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Chat handler instantiated over trait objects for HTTP wiring.
pub type DynChatHandler = ChatHandler<
    dyn AgentRepository,
    dyn SessionRepository,
    dyn ParticipantDirectory,
    dyn GenerationBackend,
>;

/// Create handler instantiated over trait objects for HTTP wiring.
pub type DynCreateAgentHandler = CreateAgentHandler<dyn AgentRepository, dyn AgentRegistry>;

/// Deactivate handler instantiated over trait objects for HTTP wiring.
pub type DynDeactivateAgentHandler = DeactivateAgentHandler<dyn AgentRepository>;

/// Conversation handler instantiated over trait objects for HTTP wiring.
pub type DynGetConversationHandler =
    GetConversationHandler<dyn AgentRepository, dyn SessionRepository>;

#[derive(Clone)]
pub struct AgentHandlers {
    create_handler: Arc<DynCreateAgentHandler>,
    chat_handler: Arc<DynChatHandler>,
    conversation_handler: Arc<DynGetConversationHandler>,
    deactivate_handler: Arc<DynDeactivateAgentHandler>,
}

impl AgentHandlers {
    pub fn new(
        create_handler: Arc<DynCreateAgentHandler>,
        chat_handler: Arc<DynChatHandler>,
        conversation_handler: Arc<DynGetConversationHandler>,
        deactivate_handler: Arc<DynDeactivateAgentHandler>,
    ) -> Self {
        Self {
            create_handler,
            chat_handler,
            conversation_handler,
            deactivate_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/agents - Create a new agent
pub async fn create_agent(
    State(handlers): State<AgentHandlers>,
    Json(req): Json<CreateAgentRequest>,
) -> Response {
    let mut cmd = CreateAgentCommand::new(req.name);
    if let Some(description) = req.description {
        cmd = cmd.with_description(description);
    }
    if let Some(personality) = req.personality {
        cmd = cmd.with_personality(personality);
    }
    if let Some(response_style) = req.response_style {
        cmd = cmd.with_response_style(response_style);
    }
    let cmd = cmd
        .with_knowledge(req.knowledge.into_iter().map(Into::into).collect())
        .with_workflows(req.workflows.into_iter().map(Into::into).collect());

    match handlers.create_handler.handle(cmd).await {
        Ok(result) => {
            let response: AgentResponse = result.agent.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_create_agent_error(e),
    }
}

/// POST /api/agents/:id/chat - Run one conversation turn
pub async fn chat(
    State(handlers): State<AgentHandlers>,
    Path(agent_id): Path<String>,
    Json(req): Json<ChatRequest>,
) -> Response {
    let agent_id = match agent_id.parse::<AgentId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid agent ID")),
            )
                .into_response()
        }
    };

    let participant_id = match ParticipantId::new(req.participant_id) {
        Ok(id) => id,
        Err(e) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::validation(e.to_string())),
            )
                .into_response()
        }
    };

    let cmd = ChatCommand::new(agent_id, participant_id, req.message);

    match handlers.chat_handler.handle(cmd).await {
        Ok(result) => {
            let response: ChatResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_chat_error(e),
    }
}

/// GET /api/agents/:id/conversation - Fetch the active conversation for a pair
pub async fn get_conversation(
    State(handlers): State<AgentHandlers>,
    Path(agent_id): Path<String>,
    Query(query): Query<ConversationQuery>,
) -> Response {
    let agent_id = match agent_id.parse::<AgentId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid agent ID")),
            )
                .into_response()
        }
    };

    let participant_id = match ParticipantId::new(query.participant_id) {
        Ok(id) => id,
        Err(e) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::validation(e.to_string())),
            )
                .into_response()
        }
    };

    let query = GetConversationQuery::new(agent_id, participant_id);

    match handlers.conversation_handler.handle(query).await {
        Ok(view) => {
            let response: ConversationResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_get_conversation_error(e),
    }
}

/// DELETE /api/agents/:id - Deactivate an agent (soft delete)
pub async fn deactivate_agent(
    State(handlers): State<AgentHandlers>,
    Path(agent_id): Path<String>,
) -> Response {
    let agent_id = match agent_id.parse::<AgentId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid agent ID")),
            )
                .into_response()
        }
    };

    let cmd = DeactivateAgentCommand::new(agent_id);

    match handlers.deactivate_handler.handle(cmd).await {
        Ok(result) => {
            let response = DeactivateAgentResponse {
                agent_id: result.agent_id.to_string(),
                message: "Agent deactivated successfully".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_deactivate_agent_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_create_agent_error(error: CreateAgentError) -> Response {
    match error {
        CreateAgentError::Validation(message) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::validation(message)),
        )
            .into_response(),
        CreateAgentError::InvalidPersona(tag) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::validation(format!(
                "Unknown persona tag: {}",
                tag
            ))),
        )
            .into_response(),
        CreateAgentError::Domain(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(message)),
        )
            .into_response(),
    }
}

fn handle_chat_error(error: ChatError) -> Response {
    match error {
        ChatError::EmptyContent => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::validation("Message content cannot be empty")),
        )
            .into_response(),
        ChatError::AgentNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Agent", &id.to_string())),
        )
            .into_response(),
        ChatError::AgentInactive(id) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(format!("Agent {} is inactive", id))),
        )
            .into_response(),
        ChatError::Domain(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(message)),
        )
            .into_response(),
    }
}

fn handle_get_conversation_error(error: GetConversationError) -> Response {
    match error {
        GetConversationError::AgentNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Agent", &id.to_string())),
        )
            .into_response(),
        GetConversationError::Domain(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(message)),
        )
            .into_response(),
    }
}

fn handle_deactivate_agent_error(error: DeactivateAgentError) -> Response {
    match error {
        DeactivateAgentError::AgentNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Agent", &id.to_string())),
        )
            .into_response(),
        DeactivateAgentError::AlreadyInactive(id) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(format!(
                "Agent {} is already inactive",
                id
            ))),
        )
            .into_response(),
        DeactivateAgentError::Domain(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(message)),
        )
            .into_response(),
    }
}
