//! Conversation orchestration pipeline.
//!
//! One call to [`ConversationOrchestrator::process`] runs a full turn:
//! classify intent, retrieve knowledge and workflows, build the prompt,
//! invoke the generation backend under a time bound, score confidence,
//! and refine the reply. The generation call is the only step that can
//! fail and the only suspension point; its failure degrades to a fixed
//! fallback reply instead of surfacing to the caller.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::domain::agent::AgentProfile;
use crate::domain::foundation::Intent;
use crate::domain::orchestration::context::TurnContext;
use crate::domain::orchestration::intent::IntentClassifier;
use crate::domain::orchestration::prompt::PromptBuilder;
use crate::domain::orchestration::refine::ResponseRefiner;
use crate::domain::orchestration::retrieval::KnowledgeMatcher;
use crate::ports::{GenerationBackend, GenerationError};

/// Reply substituted when generation fails or times out.
pub const FALLBACK_REPLY: &str = "I apologize, but I'm experiencing technical difficulties. \
     Please try again or contact your HR representative for immediate assistance.";

/// Confidence reported for a fallback reply.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

const BASE_CONFIDENCE: f64 = 0.7;

/// How the reply text was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The backend produced text.
    Generated {
        /// Raw, unrefined reply text.
        text: String,
    },
    /// The backend failed or timed out; the fallback reply stands in.
    Fallback {
        /// Failure description, for logging only.
        reason: String,
    },
}

impl GenerationOutcome {
    /// Returns true if the turn degraded to the fallback reply.
    pub fn is_fallback(&self) -> bool {
        matches!(self, GenerationOutcome::Fallback { .. })
    }
}

/// Completed turn output handed back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestrationResult {
    /// Refined reply text.
    pub content: String,
    /// Wall-clock latency of the generation call in milliseconds.
    pub response_time_ms: u64,
    /// Confidence score in [0.0, 1.0].
    pub confidence: f64,
    /// Intent detected for the participant's message.
    pub intent: Intent,
    /// How the reply was obtained.
    pub outcome: GenerationOutcome,
}

/// Runs the per-turn message pipeline against a generation backend.
pub struct ConversationOrchestrator<G: ?Sized> {
    generation: Arc<G>,
    generation_timeout: Duration,
}

impl<G> ConversationOrchestrator<G>
where
    G: GenerationBackend + ?Sized,
{
    /// Creates a new orchestrator.
    pub fn new(generation: Arc<G>, generation_timeout: Duration) -> Self {
        Self {
            generation,
            generation_timeout,
        }
    }

    /// Processes one conversation turn.
    ///
    /// Classification, retrieval, prompt assembly, and refinement are pure
    /// in-memory transformations; only the generation call performs I/O.
    /// Confidence is scored on the raw backend text, before refinement.
    pub async fn process(
        &self,
        message: &str,
        agent: &AgentProfile,
        context: &TurnContext,
    ) -> OrchestrationResult {
        let intent = IntentClassifier::classify(message);
        let knowledge = KnowledgeMatcher::relevant_knowledge(message, agent.knowledge());
        let workflows = KnowledgeMatcher::triggered_workflows(message, agent.workflows());
        let prompt = PromptBuilder::build(agent, &knowledge, &workflows, message);

        let started = Instant::now();
        let outcome = self.generate_bounded(&prompt).await;
        let response_time_ms = started.elapsed().as_millis() as u64;

        let (raw, confidence) = match &outcome {
            GenerationOutcome::Generated { text } => {
                (text.as_str(), Self::score_confidence(text, intent))
            }
            GenerationOutcome::Fallback { reason } => {
                warn!(
                    agent_id = %agent.id(),
                    intent = %intent,
                    reason = %reason,
                    "generation failed, substituting fallback reply"
                );
                (FALLBACK_REPLY, FALLBACK_CONFIDENCE)
            }
        };

        let content = ResponseRefiner::refine(
            raw,
            agent.personality(),
            agent.response_style(),
            context.participant.as_ref(),
        );

        OrchestrationResult {
            content,
            response_time_ms,
            confidence,
            intent,
            outcome,
        }
    }

    async fn generate_bounded(&self, prompt: &str) -> GenerationOutcome {
        match tokio::time::timeout(self.generation_timeout, self.generation.generate(prompt)).await
        {
            Ok(Ok(text)) => GenerationOutcome::Generated { text },
            Ok(Err(error)) => GenerationOutcome::Fallback {
                reason: error.to_string(),
            },
            Err(_) => GenerationOutcome::Fallback {
                reason: GenerationError::timeout(self.generation_timeout.as_secs() as u32)
                    .to_string(),
            },
        }
    }

    /// Scores confidence for raw backend text: a base value, one step for
    /// each length threshold the reply clears, one step when the detected
    /// intent is not the fallback label, capped at 1.0.
    fn score_confidence(reply: &str, intent: Intent) -> f64 {
        let mut confidence = BASE_CONFIDENCE;
        if reply.len() > 50 {
            confidence += 0.1;
        }
        if reply.len() > 100 {
            confidence += 0.1;
        }
        if !intent.is_fallback() {
            confidence += 0.1;
        }
        confidence.min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::agent::{KnowledgeItem, ResponseStyle, Workflow};
    use crate::domain::foundation::{AgentId, ParticipantId};
    use crate::domain::orchestration::context::ParticipantProfile;
    use crate::ports::BackendInfo;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockBackend {
        reply: Result<String, String>,
        delay: Option<Duration>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockBackend {
        fn replying(reply: impl Into<String>) -> Self {
            Self {
                reply: Ok(reply.into()),
                delay: None,
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn failing(reason: impl Into<String>) -> Self {
            Self {
                reply: Err(reason.into()),
                delay: None,
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn seen_prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerationBackend for MockBackend {
        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(reason) => Err(GenerationError::unavailable(reason.clone())),
            }
        }

        fn backend_info(&self) -> BackendInfo {
            BackendInfo::new("mock", "mock-model")
        }
    }

    fn agent_with_knowledge() -> AgentProfile {
        let mut agent = AgentProfile::new(AgentId::new(), "Nova").unwrap();
        agent.replace_knowledge(vec![
            KnowledgeItem::new("benefits", "health and dental").unwrap()
        ]);
        agent.replace_workflows(vec![Workflow::new(
            "enrollment",
            vec!["open portal".to_string(), "pick plan".to_string()],
            vec!["enroll".to_string()],
        )
        .unwrap()]);
        agent
    }

    fn orchestrator(backend: MockBackend) -> (ConversationOrchestrator<MockBackend>, Arc<MockBackend>) {
        let backend = Arc::new(backend);
        (
            ConversationOrchestrator::new(Arc::clone(&backend), Duration::from_secs(5)),
            backend,
        )
    }

    mod pipeline {
        use super::*;

        #[tokio::test]
        async fn successful_turn_carries_intent_and_generated_text() {
            let (orchestrator, backend) =
                orchestrator(MockBackend::replying("Your benefits include health and dental."));
            let agent = agent_with_knowledge();

            let result = orchestrator
                .process("What are my benefits?", &agent, &TurnContext::new())
                .await;

            assert_eq!(result.intent, Intent::BenefitsInquiry);
            assert_eq!(result.content, "Your benefits include health and dental.");
            assert!(matches!(
                result.outcome,
                GenerationOutcome::Generated { .. }
            ));

            let prompts = backend.seen_prompts();
            assert_eq!(prompts.len(), 1);
            assert!(prompts[0].contains("benefits: health and dental"));
            assert!(prompts[0].contains("User's message: \"What are my benefits?\""));
        }

        #[tokio::test]
        async fn triggered_workflow_reaches_the_prompt() {
            let (orchestrator, backend) = orchestrator(MockBackend::replying("Sure."));
            let agent = agent_with_knowledge();

            orchestrator
                .process("how do I enroll?", &agent, &TurnContext::new())
                .await;

            let prompts = backend.seen_prompts();
            assert!(prompts[0].contains("- enrollment: open portal, pick plan"));
        }

        #[tokio::test]
        async fn refinement_applies_to_generated_text() {
            let (orchestrator, _) = orchestrator(MockBackend::replying("Hello. Ask your department."));
            let agent = agent_with_knowledge();
            let participant =
                ParticipantProfile::new(ParticipantId::new("emp-1").unwrap(), "Ava")
                    .with_department("Engineering");
            let context = TurnContext::new().with_participant(participant);

            let result = orchestrator.process("hello", &agent, &context).await;

            assert_eq!(result.content, "Hello Ava. Ask the Engineering department.");
        }
    }

    mod confidence {
        use super::*;

        #[tokio::test]
        async fn short_reply_with_fallback_intent_scores_base() {
            let (orchestrator, _) = orchestrator(MockBackend::replying("Sure."));
            let agent = agent_with_knowledge();

            let result = orchestrator
                .process("something unrelated", &agent, &TurnContext::new())
                .await;

            assert_eq!(result.intent, Intent::GeneralInquiry);
            assert!((result.confidence - 0.7).abs() < f64::EPSILON);
        }

        #[tokio::test]
        async fn long_reply_with_detected_intent_caps_at_one() {
            let reply = "x".repeat(120);
            let (orchestrator, _) = orchestrator(MockBackend::replying(reply));
            let agent = agent_with_knowledge();

            let result = orchestrator
                .process("question about my 401k", &agent, &TurnContext::new())
                .await;

            assert_eq!(result.intent, Intent::BenefitsInquiry);
            assert!((result.confidence - 1.0).abs() < f64::EPSILON);
        }

        #[tokio::test]
        async fn confidence_is_scored_on_raw_text_not_refined_text() {
            // 40 raw chars; the empathetic prefix pushes the refined text
            // past the first length threshold, which must not score.
            let raw = "Your badge request was sent this morning";
            assert_eq!(raw.len(), 40);

            let (orchestrator, _) = orchestrator(MockBackend::replying(raw));
            let mut agent = agent_with_knowledge();
            agent.update_response_style(ResponseStyle::Empathetic);

            let result = orchestrator
                .process("badge question please", &agent, &TurnContext::new())
                .await;

            // help_request intent adds one step; length adds none.
            assert!((result.confidence - 0.8).abs() < f64::EPSILON);
            assert!(result.content.len() > 50);
        }
    }

    mod degradation {
        use super::*;

        #[tokio::test]
        async fn backend_failure_substitutes_the_fallback_reply() {
            let (orchestrator, _) = orchestrator(MockBackend::failing("503"));
            let agent = agent_with_knowledge();

            let result = orchestrator
                .process("What are my benefits?", &agent, &TurnContext::new())
                .await;

            assert_eq!(result.content, FALLBACK_REPLY);
            assert!((result.confidence - FALLBACK_CONFIDENCE).abs() < f64::EPSILON);
            assert_eq!(result.intent, Intent::BenefitsInquiry);
            assert!(result.outcome.is_fallback());
        }

        #[tokio::test]
        async fn slow_backend_is_cut_off_and_degrades_to_fallback() {
            let backend = MockBackend::replying("too late").with_delay(Duration::from_secs(60));
            let orchestrator =
                ConversationOrchestrator::new(Arc::new(backend), Duration::from_millis(20));
            let agent = agent_with_knowledge();

            let result = orchestrator
                .process("hello", &agent, &TurnContext::new())
                .await;

            assert_eq!(result.content, FALLBACK_REPLY);
            assert!(result.outcome.is_fallback());
        }

        #[tokio::test]
        async fn fallback_reply_is_still_refined() {
            let (orchestrator, _) = orchestrator(MockBackend::failing("503"));
            let mut agent = agent_with_knowledge();
            agent.update_response_style(ResponseStyle::Empathetic);

            let result = orchestrator
                .process("hello", &agent, &TurnContext::new())
                .await;

            assert_eq!(
                result.content,
                format!("I understand this might be confusing. {}", FALLBACK_REPLY)
            );
            assert!((result.confidence - FALLBACK_CONFIDENCE).abs() < f64::EPSILON);
        }
    }
}
