//! HTTP adapters - REST API implementations.
//!
//! The agent module carries the full API surface (create, chat,
//! conversation fetch, deactivate); health is a bare liveness probe.

pub mod agent;
pub mod health;

// Re-export key types for convenience
pub use agent::agent_routes;
pub use agent::AgentHandlers;
pub use health::health_routes;
