//! Intent labels for classified inbound messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete classification label describing the purpose of a message.
///
/// `GeneralInquiry` is the fallback when no keyword rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    BenefitsInquiry,
    PolicyQuestion,
    ScheduleRequest,
    DocumentRequest,
    TechnicalSupport,
    GeneralGreeting,
    HelpRequest,
    #[default]
    GeneralInquiry,
}

impl Intent {
    /// Returns the snake_case label for this intent.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::BenefitsInquiry => "benefits_inquiry",
            Intent::PolicyQuestion => "policy_question",
            Intent::ScheduleRequest => "schedule_request",
            Intent::DocumentRequest => "document_request",
            Intent::TechnicalSupport => "technical_support",
            Intent::GeneralGreeting => "general_greeting",
            Intent::HelpRequest => "help_request",
            Intent::GeneralInquiry => "general_inquiry",
        }
    }

    /// Returns true if this is the fallback label.
    pub fn is_fallback(&self) -> bool {
        matches!(self, Intent::GeneralInquiry)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_general_inquiry() {
        assert_eq!(Intent::default(), Intent::GeneralInquiry);
    }

    #[test]
    fn only_general_inquiry_is_fallback() {
        assert!(Intent::GeneralInquiry.is_fallback());
        assert!(!Intent::BenefitsInquiry.is_fallback());
        assert!(!Intent::GeneralGreeting.is_fallback());
    }

    #[test]
    fn as_str_matches_snake_case_label() {
        assert_eq!(Intent::BenefitsInquiry.as_str(), "benefits_inquiry");
        assert_eq!(Intent::TechnicalSupport.as_str(), "technical_support");
        assert_eq!(Intent::GeneralInquiry.as_str(), "general_inquiry");
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", Intent::HelpRequest), "help_request");
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&Intent::PolicyQuestion).unwrap(),
            "\"policy_question\""
        );
    }

    #[test]
    fn deserializes_from_snake_case_json() {
        let intent: Intent = serde_json::from_str("\"schedule_request\"").unwrap();
        assert_eq!(intent, Intent::ScheduleRequest);
    }
}
