//! Persona tags controlling how an agent speaks.
//!
//! Both tags are closed sets: profile creation and update reject anything
//! outside them, and unset values fall back to the defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Personality tag for an agent profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    #[default]
    Professional,
    Friendly,
    Formal,
    Casual,
}

impl Personality {
    /// Returns the lowercase tag used in prompts and stored records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Personality::Professional => "professional",
            Personality::Friendly => "friendly",
            Personality::Formal => "formal",
            Personality::Casual => "casual",
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Personality {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "professional" => Ok(Personality::Professional),
            "friendly" => Ok(Personality::Friendly),
            "formal" => Ok(Personality::Formal),
            "casual" => Ok(Personality::Casual),
            other => Err(ValidationError::invalid_format(
                "personality",
                format!("unknown tag '{}'", other),
            )),
        }
    }
}

/// Response-style tag for an agent profile.
///
/// Drives the style transform applied to generated replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStyle {
    #[default]
    Helpful,
    Detailed,
    Concise,
    Empathetic,
}

impl ResponseStyle {
    /// Returns the lowercase tag used in prompts and stored records.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStyle::Helpful => "helpful",
            ResponseStyle::Detailed => "detailed",
            ResponseStyle::Concise => "concise",
            ResponseStyle::Empathetic => "empathetic",
        }
    }
}

impl fmt::Display for ResponseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResponseStyle {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "helpful" => Ok(ResponseStyle::Helpful),
            "detailed" => Ok(ResponseStyle::Detailed),
            "concise" => Ok(ResponseStyle::Concise),
            "empathetic" => Ok(ResponseStyle::Empathetic),
            other => Err(ValidationError::invalid_format(
                "response_style",
                format!("unknown tag '{}'", other),
            )),
        }
    }
}
