//! Generation backend port.
//!
//! Abstracts the LLM service that turns an assembled prompt into reply
//! text, so the orchestration pipeline never couples to a concrete
//! provider API.
//!
//! # Design
//!
//! - Single-shot completion only; the pipeline has no streaming surface
//! - Latency is measured by the caller, not reported by the backend
//! - Error variants cover the transport and provider failure modes the
//!   orchestrator degrades on

use async_trait::async_trait;

/// Port for prompt-to-text generation.
///
/// Implementations connect to an external model service and translate
/// provider responses and failures into [`GenerationError`].
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generates reply text for the given prompt.
    ///
    /// # Errors
    ///
    /// Any [`GenerationError`]; the caller decides whether to degrade to
    /// a fallback reply or propagate.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Identifies the backend (service name and model).
    fn backend_info(&self) -> BackendInfo;
}

/// Backend identification, used for startup and fallback logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendInfo {
    /// Service name (e.g., "gemini", "mock").
    pub name: String,
    /// Model identifier (e.g., "gemini-1.5-flash").
    pub model: String,
}

impl BackendInfo {
    /// Creates new backend info.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Generation backend errors.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Provider rejected the request as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider is unavailable.
    #[error("backend unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request exceeded the configured time bound.
    #[error("generation timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl GenerationError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a timeout error.
    pub fn timeout(timeout_secs: u32) -> Self {
        Self::Timeout { timeout_secs }
    }

    /// Returns true if a later attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::RateLimited { .. }
                | GenerationError::Unavailable { .. }
                | GenerationError::Network(_)
                | GenerationError::Timeout { .. }
        )
    }
}
