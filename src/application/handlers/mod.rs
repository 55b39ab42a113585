//! Command and query handlers.
//!
//! Each handler pairs a command (or query) struct with its own error
//! enum and result type, and holds its collaborators behind `Arc`.

pub mod chat;
pub mod create_agent;
pub mod deactivate_agent;
pub mod get_conversation;

pub use chat::{ChatCommand, ChatError, ChatHandler, ChatResult};
pub use create_agent::{
    CreateAgentCommand, CreateAgentError, CreateAgentHandler, CreateAgentResult, KnowledgeEntry,
    WorkflowEntry,
};
pub use deactivate_agent::{
    DeactivateAgentCommand, DeactivateAgentError, DeactivateAgentHandler, DeactivateAgentResult,
};
pub use get_conversation::{
    ConversationView, GetConversationError, GetConversationHandler, GetConversationQuery,
};
