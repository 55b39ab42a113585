//! Knowledge items and workflows an agent can surface in replies.

use crate::domain::foundation::ValidationError;
use serde::{Deserialize, Serialize};

/// A topic/content pair from an agent's knowledge base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    topic: String,
    content: String,
}

impl KnowledgeItem {
    /// Creates a knowledge item.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the topic is empty
    pub fn new(topic: impl Into<String>, content: impl Into<String>) -> Result<Self, ValidationError> {
        let topic = topic.into();
        if topic.trim().is_empty() {
            return Err(ValidationError::empty_field("topic"));
        }
        Ok(Self {
            topic,
            content: content.into(),
        })
    }

    /// Returns the topic.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Returns the content.
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A named, triggerable sequence of steps an agent can reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    name: String,
    steps: Vec<String>,
    triggers: Vec<String>,
}

impl Workflow {
    /// Creates a workflow definition.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is empty
    pub fn new(
        name: impl Into<String>,
        steps: Vec<String>,
        triggers: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            name,
            steps,
            triggers,
        })
    }

    /// Returns the workflow name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the ordered step descriptions.
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Returns the trigger phrases.
    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knowledge_item_holds_topic_and_content() {
        let item = KnowledgeItem::new("benefits", "health and dental").unwrap();
        assert_eq!(item.topic(), "benefits");
        assert_eq!(item.content(), "health and dental");
    }

    #[test]
    fn knowledge_item_rejects_empty_topic() {
        assert!(KnowledgeItem::new("", "content").is_err());
        assert!(KnowledgeItem::new("   ", "content").is_err());
    }

    #[test]
    fn knowledge_item_allows_empty_content() {
        let item = KnowledgeItem::new("parking", "").unwrap();
        assert_eq!(item.content(), "");
    }

    #[test]
    fn workflow_holds_steps_in_order() {
        let wf = Workflow::new(
            "it_setup",
            vec!["request laptop".to_string(), "create accounts".to_string()],
            vec!["laptop".to_string()],
        )
        .unwrap();
        assert_eq!(wf.name(), "it_setup");
        assert_eq!(wf.steps(), &["request laptop", "create accounts"]);
        assert_eq!(wf.triggers(), &["laptop"]);
    }

    #[test]
    fn workflow_rejects_empty_name() {
        assert!(Workflow::new("", vec![], vec![]).is_err());
    }

    #[test]
    fn workflow_allows_no_triggers() {
        let wf = Workflow::new("orientation", vec!["tour".to_string()], vec![]).unwrap();
        assert!(wf.triggers().is_empty());
    }
}
