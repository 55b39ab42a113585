//! In-memory persistence adapters.
//!
//! Process-local implementations of the repository and directory ports,
//! used for development and tests.

mod agent_repository;
mod participant_directory;
mod session_repository;

pub use agent_repository::InMemoryAgentRepository;
pub use participant_directory::InMemoryParticipantDirectory;
pub use session_repository::InMemorySessionRepository;
