//! Ledger registration state for an agent profile.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of the external registration side-channel for one agent.
///
/// Registration never gates conversation turns: the pipeline must serve an
/// agent in any of these states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    /// The side-channel acknowledged the registration.
    Confirmed,
    /// Registration was attempted and failed; retried out of band.
    Pending,
    /// No registration has been attempted.
    #[default]
    Unregistered,
}

impl RegistrationStatus {
    /// Returns true if the side-channel acknowledged this agent.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, RegistrationStatus::Confirmed)
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Unregistered => "unregistered",
        };
        write!(f, "{}", s)
    }
}
