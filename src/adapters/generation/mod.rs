//! Generation backend adapters.
//!
//! Implementations of the GenerationBackend port.
//!
//! ## Available Adapters
//!
//! - `GeminiBackend` - Google's Generative Language API
//! - `MockGenerationBackend` - Configurable mock for testing

mod gemini;
mod mock;

pub use gemini::{GeminiBackend, GeminiConfig};
pub use mock::{MockGenerationBackend, MockGenerationError, MockReply};
