//! Application layer - commands, queries, and handlers.
//!
//! This layer orchestrates domain operations and coordinates between
//! ports. Handlers own the turn plumbing: per-pair turn locks, session
//! resolution, and the per-agent metrics fold.

pub mod handlers;
pub mod metrics;
pub mod session_store;
pub mod turn_locks;

pub use handlers::{
    // Agent lifecycle
    CreateAgentCommand, CreateAgentError, CreateAgentHandler, CreateAgentResult,
    DeactivateAgentCommand, DeactivateAgentError, DeactivateAgentHandler, DeactivateAgentResult,
    KnowledgeEntry, WorkflowEntry,
    // Conversation
    ChatCommand, ChatError, ChatHandler, ChatResult,
    ConversationView, GetConversationError, GetConversationHandler, GetConversationQuery,
};

pub use metrics::MetricsAccumulator;
pub use session_store::{ResolvedSession, SessionStore};
pub use turn_locks::KeyedLocks;
