//! Generation backend configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Generation backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// Backend selector
    #[serde(default = "default_provider")]
    pub provider: GenerationProvider,

    /// Gemini API key
    pub api_key: Option<Secret<String>>,

    /// Gemini model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Gemini API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Generation timeout in seconds (bounds the whole turn's suspension)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// Generation backend type
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GenerationProvider {
    #[default]
    Gemini,
    Mock,
}

impl GenerationConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    /// Validate generation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.provider == GenerationProvider::Gemini && !self.has_api_key() {
            return Err(ValidationError::MissingRequired(
                "GANGWAY__GENERATION__API_KEY",
            ));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidGenerationBaseUrl);
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_provider() -> GenerationProvider {
    GenerationProvider::Gemini
}

fn default_model() -> String {
    "gemini-pro".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout() -> u64 {
    30
}
