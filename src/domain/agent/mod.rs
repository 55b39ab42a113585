//! Agent module - Profiles, persona tags, knowledge, and metrics.
//!
//! An agent is a configured conversational persona. Its knowledge base and
//! workflows feed the orchestration pipeline; its metrics are written back
//! by the pipeline after every served turn.

mod knowledge;
mod metrics;
mod persona;
mod profile;
mod registration;

pub use knowledge::{KnowledgeItem, Workflow};
pub use metrics::AgentMetrics;
pub use persona::{Personality, ResponseStyle};
pub use profile::{AgentProfile, MAX_NAME_LENGTH};
pub use registration::RegistrationStatus;
