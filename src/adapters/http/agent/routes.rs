//! HTTP routes for agent endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{chat, create_agent, deactivate_agent, get_conversation, AgentHandlers};

/// Creates the agent router with all endpoints.
pub fn agent_routes(handlers: AgentHandlers) -> Router {
    Router::new()
        .route("/", post(create_agent))
        .route("/:id", delete(deactivate_agent))
        .route("/:id/chat", post(chat))
        .route("/:id/conversation", get(get_conversation))
        .with_state(handlers)
}
