//! Keyword-driven intent classification.
//!
//! The rule table is an ordered sequence, not a map: entries are evaluated
//! in declaration order and the first whose keyword set hits wins, so ties
//! between keyword sets resolve by position rather than specificity.

use crate::domain::foundation::Intent;

/// Ordered (label, keyword-set) rules. First match wins.
const INTENT_RULES: &[(Intent, &[&str])] = &[
    (
        Intent::BenefitsInquiry,
        &["benefit", "insurance", "health", "dental", "401k", "retirement"],
    ),
    (
        Intent::PolicyQuestion,
        &["policy", "rule", "procedure", "handbook", "guideline"],
    ),
    (
        Intent::ScheduleRequest,
        &["schedule", "meeting", "appointment", "calendar", "time"],
    ),
    (
        Intent::DocumentRequest,
        &["document", "form", "paperwork", "file", "download"],
    ),
    (
        Intent::TechnicalSupport,
        &["laptop", "computer", "password", "login", "access", "it"],
    ),
    (
        Intent::GeneralGreeting,
        &["hello", "hi", "hey", "good morning", "good afternoon"],
    ),
    (
        Intent::HelpRequest,
        &["help", "assist", "support", "question", "confused"],
    ),
];

/// Maps a message to exactly one intent label.
///
/// Classification is a pure function of the message text and the fixed
/// rule table: case-fold the message, scan the rules in order, return the
/// first label any of whose keywords is a substring. No match yields the
/// fallback `Intent::GeneralInquiry`.
pub struct IntentClassifier;

impl IntentClassifier {
    /// Classifies a message.
    pub fn classify(message: &str) -> Intent {
        let normalized = message.to_lowercase();

        for (intent, keywords) in INTENT_RULES {
            if keywords.iter().any(|keyword| normalized.contains(keyword)) {
                return *intent;
            }
        }

        Intent::GeneralInquiry
    }

    /// Returns the ordered rule table.
    pub fn rules() -> &'static [(Intent, &'static [&'static str])] {
        INTENT_RULES
    }
}
