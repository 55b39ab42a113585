//! Message orchestration pipeline.
//!
//! Everything that happens between an accepted participant message and a
//! reply ready for persistence: intent classification, knowledge and
//! workflow retrieval, prompt assembly, the bounded generation call, and
//! response refinement. All stages except the generation call are pure
//! functions over the agent's configuration and the turn context.

mod context;
mod intent;
mod orchestrator;
mod prompt;
mod refine;
mod retrieval;

pub use context::{ParticipantProfile, TurnContext};
pub use intent::IntentClassifier;
pub use orchestrator::{
    ConversationOrchestrator, GenerationOutcome, OrchestrationResult, FALLBACK_CONFIDENCE,
    FALLBACK_REPLY,
};
pub use prompt::PromptBuilder;
pub use refine::{ResponseRefiner, REDACTION_MARKER};
pub use retrieval::{KnowledgeMatcher, MAX_KNOWLEDGE_MATCHES};
