//! Agent registry adapters.
//!
//! Implementations of the AgentRegistry port.
//!
//! ## Available Adapters
//!
//! - `HttpAgentRegistry` - External registry service over HTTP
//! - `NullAgentRegistry` - Disabled registry for deployments without one

mod http;
mod null;

pub use http::{HttpAgentRegistry, HttpRegistryConfig};
pub use null::NullAgentRegistry;
