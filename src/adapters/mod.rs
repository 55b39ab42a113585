//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `generation` - Generation backends (Gemini HTTP, mock)
//! - `http` - REST API surface (axum)
//! - `memory` - In-memory repositories and participant directory
//! - `registry` - Agent registration side-channel (HTTP ledger, null)

pub mod generation;
pub mod http;
pub mod memory;
pub mod registry;

pub use generation::{GeminiBackend, GeminiConfig, MockGenerationBackend};
pub use memory::{InMemoryAgentRepository, InMemoryParticipantDirectory, InMemorySessionRepository};
pub use registry::{HttpAgentRegistry, HttpRegistryConfig, NullAgentRegistry};
