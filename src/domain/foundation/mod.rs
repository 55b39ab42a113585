//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Gangway domain.

mod ids;
mod timestamp;
mod intent;
mod session_status;
mod errors;

pub use ids::{AgentId, ParticipantId, SessionToken};
pub use timestamp::Timestamp;
pub use intent::Intent;
pub use session_status::SessionStatus;
pub use errors::{DomainError, ErrorCode, ValidationError};
