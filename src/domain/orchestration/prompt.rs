//! Prompt assembly for the generation backend.
//!
//! The prompt is plain text with fixed section framing. Sections for
//! knowledge and workflows are omitted entirely when retrieval found
//! nothing, so the backend never sees an empty heading.

use crate::domain::agent::{AgentProfile, KnowledgeItem, Workflow};

const CLOSING_INSTRUCTION: &str = "Please provide a helpful, professional response that \
     addresses the user's needs. Keep responses concise but informative. If you need more \
     information, ask clarifying questions.";

/// Stateless prompt assembler.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Builds the full generation prompt from the agent's persona, the
    /// retrieved knowledge and workflows, and the participant's message.
    pub fn build(
        agent: &AgentProfile,
        knowledge: &[&KnowledgeItem],
        workflows: &[&Workflow],
        message: &str,
    ) -> String {
        let mut prompt = format!(
            "You are {}, a professional HR onboarding assistant. Your personality is {} and \
             your response style is {}.\n\n",
            agent.name(),
            agent.personality(),
            agent.response_style(),
        );

        if !knowledge.is_empty() {
            prompt.push_str("Relevant company information:\n");
            for item in knowledge {
                prompt.push_str(&format!("- {}: {}\n", item.topic(), item.content()));
            }
            prompt.push('\n');
        }

        if !workflows.is_empty() {
            prompt.push_str("Relevant workflows:\n");
            for workflow in workflows {
                prompt.push_str(&format!(
                    "- {}: {}\n",
                    workflow.name(),
                    workflow.steps().join(", ")
                ));
            }
            prompt.push('\n');
        }

        prompt.push_str(&format!("User's message: \"{}\"\n\n", message));
        prompt.push_str(CLOSING_INSTRUCTION);
        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::AgentId;

    fn agent(name: &str) -> AgentProfile {
        AgentProfile::new(AgentId::new(), name).unwrap()
    }

    #[test]
    fn full_prompt_contains_every_section_in_order() {
        let agent = agent("Ava");
        let item = KnowledgeItem::new("benefits", "Health coverage starts day one").unwrap();
        let flow = Workflow::new(
            "equipment",
            vec!["request laptop".to_string(), "confirm shipping".to_string()],
            vec!["laptop".to_string()],
        )
        .unwrap();

        let prompt = PromptBuilder::build(
            &agent,
            &[&item],
            &[&flow],
            "tell me about benefits",
        );

        let expected = "You are Ava, a professional HR onboarding assistant. Your personality \
             is professional and your response style is helpful.\n\n\
             Relevant company information:\n\
             - benefits: Health coverage starts day one\n\n\
             Relevant workflows:\n\
             - equipment: request laptop, confirm shipping\n\n\
             User's message: \"tell me about benefits\"\n\n\
             Please provide a helpful, professional response that addresses the user's \
             needs. Keep responses concise but informative. If you need more information, \
             ask clarifying questions.";
        assert_eq!(prompt, expected);
    }

    #[test]
    fn knowledge_section_is_omitted_when_nothing_matched() {
        let agent = agent("Ava");

        let prompt = PromptBuilder::build(&agent, &[], &[], "hello");

        assert!(!prompt.contains("Relevant company information:"));
        assert!(!prompt.contains("Relevant workflows:"));
        assert!(prompt.contains("User's message: \"hello\""));
    }

    #[test]
    fn persona_fields_flow_into_the_preamble() {
        use crate::domain::agent::{Personality, ResponseStyle};

        let mut agent = agent("Sam");
        agent.update_personality(Personality::Friendly);
        agent.update_response_style(ResponseStyle::Concise);

        let prompt = PromptBuilder::build(&agent, &[], &[], "hi");

        assert!(prompt.starts_with(
            "You are Sam, a professional HR onboarding assistant. Your personality is \
             friendly and your response style is concise."
        ));
    }

    #[test]
    fn workflow_steps_are_comma_joined() {
        let agent = agent("Ava");
        let flow = Workflow::new(
            "orientation",
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![],
        )
        .unwrap();

        let prompt = PromptBuilder::build(&agent, &[], &[&flow], "when is orientation");

        assert!(prompt.contains("- orientation: a, b, c\n"));
    }
}
