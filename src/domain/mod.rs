//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `agent` - AgentProfile aggregate: persona, knowledge base, metrics
//! - `conversation` - ConversationSession aggregate and message types
//! - `orchestration` - Per-turn message pipeline from classification to refinement

pub mod agent;
pub mod conversation;
pub mod foundation;
pub mod orchestration;
