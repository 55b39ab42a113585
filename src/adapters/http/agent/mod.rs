//! HTTP adapter for agent endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AgentResponse, ChatRequest, ChatResponse, ConversationQuery, ConversationResponse,
    CreateAgentRequest, DeactivateAgentResponse, ErrorResponse, KnowledgeEntryRequest,
    MessageResponse, WorkflowEntryRequest,
};
pub use handlers::{
    AgentHandlers, DynChatHandler, DynCreateAgentHandler, DynDeactivateAgentHandler,
    DynGetConversationHandler,
};
pub use routes::agent_routes;
