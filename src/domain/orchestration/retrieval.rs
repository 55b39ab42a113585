//! Keyword retrieval over an agent's knowledge base and workflows.
//!
//! Retrieval is deliberately simple substring matching against the
//! case-folded participant message. Knowledge lookup stops at
//! [`MAX_KNOWLEDGE_MATCHES`] items so a broad message cannot drag the
//! whole knowledge base into the prompt; workflow lookup is uncapped
//! because triggered workflows are expected to be few and short.

use crate::domain::agent::{KnowledgeItem, Workflow};

/// Upper bound on knowledge items injected into a single prompt.
pub const MAX_KNOWLEDGE_MATCHES: usize = 3;

/// Stateless matcher shared by the orchestration pipeline.
pub struct KnowledgeMatcher;

impl KnowledgeMatcher {
    /// Selects up to [`MAX_KNOWLEDGE_MATCHES`] knowledge items relevant to
    /// the message, preserving the order they appear in the agent's
    /// knowledge base. Scanning stops as soon as the cap is reached.
    ///
    /// An item matches when the message contains its topic, or when the
    /// message contains any single word of its content. An item with empty
    /// content and an unmatched topic never matches.
    pub fn relevant_knowledge<'a>(
        message: &str,
        items: &'a [KnowledgeItem],
    ) -> Vec<&'a KnowledgeItem> {
        let normalized = message.to_lowercase();
        let mut matched = Vec::new();
        for item in items {
            if Self::matches_item(&normalized, item) {
                matched.push(item);
                if matched.len() == MAX_KNOWLEDGE_MATCHES {
                    break;
                }
            }
        }
        matched
    }

    /// Selects every workflow with at least one trigger phrase contained in
    /// the message. Workflow retrieval has no cap.
    pub fn triggered_workflows<'a>(
        message: &str,
        workflows: &'a [Workflow],
    ) -> Vec<&'a Workflow> {
        let normalized = message.to_lowercase();
        workflows
            .iter()
            .filter(|workflow| {
                workflow
                    .triggers()
                    .iter()
                    .any(|trigger| normalized.contains(&trigger.to_lowercase()))
            })
            .collect()
    }

    fn matches_item(normalized: &str, item: &KnowledgeItem) -> bool {
        if normalized.contains(&item.topic().to_lowercase()) {
            return true;
        }
        item.content()
            .to_lowercase()
            .split_whitespace()
            .any(|word| normalized.contains(word))
    }
}
