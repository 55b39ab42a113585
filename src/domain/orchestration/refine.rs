//! Post-generation refinement of the reply text.
//!
//! Three stages run in a fixed order: persona-driven tone adjustment,
//! participant personalization, and compliance redaction. Redaction runs
//! last so text introduced by the earlier stages is still scanned.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use crate::domain::agent::{Personality, ResponseStyle};
use crate::domain::orchestration::context::ParticipantProfile;

/// Marker substituted for every redacted term.
pub const REDACTION_MARKER: &str = "[REDACTED]";

const EMPATHY_PREFIX: &str = "I understand this might be confusing. ";

static INFORMAL_GREETING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(hi|hey)\b").expect("invalid greeting pattern"));

static FORMAL_GREETING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bHello\b").expect("invalid greeting pattern"));

static DEPARTMENT_PHRASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)your department").expect("invalid department pattern"));

/// Sensitive-term patterns, applied in declaration order.
static REDACTED_TERMS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![Regex::new(r"(?i)\b(password|ssn|social security)\b").expect("invalid redaction pattern")]
});

/// Stateless refinement pipeline applied to every reply, fallback included.
pub struct ResponseRefiner;

impl ResponseRefiner {
    /// Refines a raw reply. Tone adjustment is keyed on the agent's persona
    /// tags: a formal personality standardizes informal greetings, a casual
    /// personality relaxes the formal one, and an empathetic response style
    /// prepends an acknowledgment when the text does not already carry an
    /// empathy-signaling word. Personalization only runs when the
    /// participant is known. Redaction always runs.
    pub fn refine(
        raw: &str,
        personality: Personality,
        style: ResponseStyle,
        participant: Option<&ParticipantProfile>,
    ) -> String {
        let styled = Self::apply_tone(raw, personality, style);
        let personalized = match participant {
            Some(profile) => Self::personalize(styled, profile),
            None => styled,
        };
        Self::redact(personalized)
    }

    fn apply_tone(raw: &str, personality: Personality, style: ResponseStyle) -> String {
        let text = match personality {
            Personality::Formal => INFORMAL_GREETING.replace_all(raw, "Hello").into_owned(),
            Personality::Casual => FORMAL_GREETING.replace_all(raw, "Hi").into_owned(),
            Personality::Professional | Personality::Friendly => raw.to_string(),
        };

        // Guard words are matched case-sensitively; the prefix itself
        // contains "understand", so the prepend can never double up.
        if style == ResponseStyle::Empathetic
            && !text.contains("understand")
            && !text.contains("help")
        {
            return format!("{}{}", EMPATHY_PREFIX, text);
        }
        text
    }

    fn personalize(text: String, profile: &ParticipantProfile) -> String {
        let mut text = text;
        if !profile.given_name.is_empty() {
            let greeting = format!("Hello {}", profile.given_name);
            text = FORMAL_GREETING
                .replace(&text, NoExpand(&greeting))
                .into_owned();
        }
        if let Some(department) = &profile.department {
            let phrase = format!("the {} department", department);
            text = DEPARTMENT_PHRASE
                .replace_all(&text, NoExpand(&phrase))
                .into_owned();
        }
        text
    }

    fn redact(text: String) -> String {
        let mut text = text;
        for pattern in REDACTED_TERMS.iter() {
            text = pattern.replace_all(&text, REDACTION_MARKER).into_owned();
        }
        text
    }
}
