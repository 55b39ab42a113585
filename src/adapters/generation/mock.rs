//! Mock generation backend for testing.
//!
//! Configurable replacement for the real API, letting tests script
//! replies, inject errors, and simulate latency.
//!
//! # Example
//!
//! ```ignore
//! let backend = MockGenerationBackend::new()
//!     .with_reply("Your benefits include health coverage.")
//!     .with_delay(Duration::from_millis(100));
//!
//! let text = backend.generate("prompt").await?;
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{BackendInfo, GenerationBackend, GenerationError};

/// Mock generation backend.
///
/// Replies are consumed in configuration order; once exhausted, a fixed
/// default reply is returned.
#[derive(Debug, Clone)]
pub struct MockGenerationBackend {
    /// Pre-configured replies (consumed in order).
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    /// Backend info to return.
    info: BackendInfo,
    /// Simulated latency per request.
    delay: Duration,
    /// Prompt history for verification.
    calls: Arc<Mutex<Vec<String>>>,
}

/// A configured mock reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return a successful reply.
    Success(String),
    /// Return an error.
    Error(MockGenerationError),
}

/// Mock error types for testing degradation paths.
#[derive(Debug, Clone)]
pub enum MockGenerationError {
    /// Simulate rate limiting.
    RateLimited { retry_after_secs: u32 },
    /// Simulate backend unavailable.
    Unavailable { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate network error.
    Network { message: String },
    /// Simulate timeout.
    Timeout { timeout_secs: u32 },
}

impl From<MockGenerationError> for GenerationError {
    fn from(err: MockGenerationError) -> Self {
        match err {
            MockGenerationError::RateLimited { retry_after_secs } => {
                GenerationError::rate_limited(retry_after_secs)
            }
            MockGenerationError::Unavailable { message } => GenerationError::unavailable(message),
            MockGenerationError::AuthenticationFailed => GenerationError::AuthenticationFailed,
            MockGenerationError::Network { message } => GenerationError::network(message),
            MockGenerationError::Timeout { timeout_secs } => {
                GenerationError::Timeout { timeout_secs }
            }
        }
    }
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerationBackend {
    /// Creates a new mock backend with default settings.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            info: BackendInfo::new("mock", "mock-model-1"),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful reply to the queue.
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        let mut replies = self.replies.lock().unwrap();
        replies.push_back(MockReply::Success(content.into()));
        drop(replies);
        self
    }

    /// Adds an error reply to the queue.
    pub fn with_error(self, error: MockGenerationError) -> Self {
        let mut replies = self.replies.lock().unwrap();
        replies.push_back(MockReply::Error(error));
        drop(replies);
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the backend info.
    pub fn with_backend_info(mut self, info: BackendInfo) -> Self {
        self.info = info;
        self
    }

    /// Returns the number of calls made to this backend.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded prompts.
    pub fn seen_prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Clears the prompt history.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Gets the next reply or a default.
    fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockReply::Success("Mock reply".to_string()))
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(prompt.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_reply() {
            MockReply::Success(content) => Ok(content),
            MockReply::Error(err) => Err(err.into()),
        }
    }

    fn backend_info(&self) -> BackendInfo {
        self.info.clone()
    }
}
