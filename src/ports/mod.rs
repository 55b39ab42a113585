//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Generation
//!
//! - `GenerationBackend` - Prompt-to-text completion against an LLM service
//!
//! ## Persistence
//!
//! - `AgentRepository` - AgentProfile aggregate persistence
//! - `SessionRepository` - ConversationSession persistence, pair-scoped
//!
//! ## Collaborators
//!
//! - `ParticipantDirectory` - Read-only participant identity lookup
//! - `AgentRegistry` - Best-effort external agent registration

mod agent_registry;
mod agent_repository;
mod generation;
mod participant_directory;
mod session_repository;

pub use agent_registry::{AgentRegistry, RegistrationReceipt, RegistrationRequest, RegistryError};
pub use agent_repository::AgentRepository;
pub use generation::{BackendInfo, GenerationBackend, GenerationError};
pub use participant_directory::ParticipantDirectory;
pub use session_repository::SessionRepository;
