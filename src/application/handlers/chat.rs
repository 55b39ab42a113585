//! Chat turn command handler.
//!
//! Drives one full conversation turn: gate on the agent, resolve the
//! pair's active session under the turn lock, run the orchestration
//! pipeline, append and persist both messages, then fold latency into
//! the agent's metrics. Generation failures never surface here; they
//! arrive from the orchestrator already degraded to the fallback reply.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::application::metrics::MetricsAccumulator;
use crate::application::session_store::SessionStore;
use crate::application::turn_locks::KeyedLocks;
use crate::domain::conversation::{Message, MessageId, MessageMetadata};
use crate::domain::foundation::{AgentId, DomainError, Intent, ParticipantId, SessionToken};
use crate::domain::orchestration::{ConversationOrchestrator, TurnContext};
use crate::ports::{AgentRepository, GenerationBackend, ParticipantDirectory, SessionRepository};

/// Command to run one conversation turn.
#[derive(Debug, Clone)]
pub struct ChatCommand {
    /// The agent addressed by the message.
    pub agent_id: AgentId,
    /// The participant sending the message.
    pub participant_id: ParticipantId,
    /// The message content.
    pub content: String,
}

impl ChatCommand {
    /// Creates a new chat command.
    pub fn new(
        agent_id: AgentId,
        participant_id: ParticipantId,
        content: impl Into<String>,
    ) -> Self {
        Self {
            agent_id,
            participant_id,
            content: content.into(),
        }
    }
}

/// Errors that can occur when handling a chat turn.
#[derive(Debug, Clone, Error)]
pub enum ChatError {
    /// Message content is empty or whitespace only.
    #[error("message content cannot be empty")]
    EmptyContent,

    /// Agent was not found.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),

    /// Agent exists but is deactivated.
    #[error("agent {0} is inactive")]
    AgentInactive(AgentId),

    /// Domain or persistence error.
    #[error("domain error: {0}")]
    Domain(String),
}

impl From<DomainError> for ChatError {
    fn from(err: DomainError) -> Self {
        ChatError::Domain(err.to_string())
    }
}

/// Result of a completed conversation turn.
#[derive(Debug, Clone)]
pub struct ChatResult {
    /// Token of the session the turn was appended to.
    pub session_token: SessionToken,
    /// ID of the stored participant message.
    pub participant_message_id: MessageId,
    /// ID of the stored agent message.
    pub agent_message_id: MessageId,
    /// Refined reply text.
    pub content: String,
    /// Intent detected for the participant's message.
    pub intent: Intent,
    /// Confidence score for the reply.
    pub confidence: f64,
    /// Generation latency in milliseconds.
    pub response_time_ms: u64,
    /// True when the reply is the fallback text.
    pub degraded: bool,
}

/// Handler for chat commands.
pub struct ChatHandler<A, S, D, G>
where
    A: AgentRepository + ?Sized,
    S: SessionRepository + ?Sized,
    D: ParticipantDirectory + ?Sized,
    G: GenerationBackend + ?Sized,
{
    agents: Arc<A>,
    directory: Arc<D>,
    store: SessionStore<S>,
    orchestrator: ConversationOrchestrator<G>,
    metrics: MetricsAccumulator<A>,
    turn_locks: KeyedLocks<(ParticipantId, AgentId)>,
}

impl<A, S, D, G> ChatHandler<A, S, D, G>
where
    A: AgentRepository + ?Sized,
    S: SessionRepository + ?Sized,
    D: ParticipantDirectory + ?Sized,
    G: GenerationBackend + ?Sized,
{
    /// Creates a new handler with the given collaborators.
    pub fn new(
        agents: Arc<A>,
        sessions: Arc<S>,
        directory: Arc<D>,
        generation: Arc<G>,
        generation_timeout: Duration,
    ) -> Self {
        Self {
            metrics: MetricsAccumulator::new(Arc::clone(&agents)),
            agents,
            directory,
            store: SessionStore::new(sessions),
            orchestrator: ConversationOrchestrator::new(generation, generation_timeout),
            turn_locks: KeyedLocks::new(),
        }
    }

    /// Handles one conversation turn.
    pub async fn handle(&self, cmd: ChatCommand) -> Result<ChatResult, ChatError> {
        let content = cmd.content.trim();
        if content.is_empty() {
            return Err(ChatError::EmptyContent);
        }

        let agent = self
            .agents
            .find_by_id(&cmd.agent_id)
            .await?
            .ok_or(ChatError::AgentNotFound(cmd.agent_id))?;
        agent
            .ensure_active()
            .map_err(|_| ChatError::AgentInactive(cmd.agent_id))?;

        // The pair lock covers resolve, append, and commit so concurrent
        // turns for one pair cannot race session creation or interleave
        // their appends.
        let turn_guard = self
            .turn_locks
            .acquire((cmd.participant_id.clone(), cmd.agent_id))
            .await;

        let mut resolved = self
            .store
            .resolve_session(&cmd.participant_id, &cmd.agent_id)
            .await?;

        let participant = self.directory.lookup(&cmd.participant_id).await?;

        // History is the window before this turn; the prompt already
        // carries the verbatim message.
        let mut context =
            TurnContext::new().with_history(resolved.session.recent_history().to_vec());
        if let Some(profile) = participant {
            context = context.with_participant(profile);
        }

        let participant_message = Message::from_participant(content)?;
        let participant_message_id = *participant_message.id();

        let result = self.orchestrator.process(content, &agent, &context).await;

        let metadata =
            MessageMetadata::new(result.response_time_ms, result.confidence, result.intent);
        let agent_message = Message::from_agent(result.content.clone(), metadata)?;
        let agent_message_id = *agent_message.id();

        resolved
            .session
            .append_turn(participant_message, agent_message)?;
        self.store.commit(&resolved).await?;
        drop(turn_guard);

        // The turn is durable at this point; metrics failures must not
        // unwind it.
        if let Err(error) = self
            .metrics
            .record_interaction(&cmd.agent_id, result.response_time_ms)
            .await
        {
            tracing::warn!(
                agent_id = %cmd.agent_id,
                error = %error,
                "failed to fold turn into agent metrics"
            );
        }

        tracing::info!(
            agent_id = %cmd.agent_id,
            participant_id = %cmd.participant_id,
            session_token = %resolved.session.token(),
            intent = %result.intent,
            response_time_ms = result.response_time_ms,
            degraded = result.outcome.is_fallback(),
            "conversation turn completed"
        );

        Ok(ChatResult {
            session_token: *resolved.session.token(),
            participant_message_id,
            agent_message_id,
            content: result.content,
            intent: result.intent,
            confidence: result.confidence,
            response_time_ms: result.response_time_ms,
            degraded: result.outcome.is_fallback(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::agent::{AgentProfile, KnowledgeItem};
    use crate::domain::conversation::{ConversationSession, Sender};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::orchestration::{ParticipantProfile, FALLBACK_CONFIDENCE, FALLBACK_REPLY};
    use crate::ports::{BackendInfo, GenerationError};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockAgentRepo {
        agents: Mutex<HashMap<AgentId, AgentProfile>>,
    }

    impl MockAgentRepo {
        fn with_agent(agent: AgentProfile) -> Self {
            let mut agents = HashMap::new();
            agents.insert(*agent.id(), agent);
            Self {
                agents: Mutex::new(agents),
            }
        }

        fn agent(&self, id: &AgentId) -> AgentProfile {
            self.agents.lock().unwrap().get(id).unwrap().clone()
        }
    }

    #[async_trait]
    impl AgentRepository for MockAgentRepo {
        async fn save(&self, agent: &AgentProfile) -> Result<(), DomainError> {
            self.agents
                .lock()
                .unwrap()
                .insert(*agent.id(), agent.clone());
            Ok(())
        }

        async fn update(&self, agent: &AgentProfile) -> Result<(), DomainError> {
            let mut agents = self.agents.lock().unwrap();
            if !agents.contains_key(agent.id()) {
                return Err(DomainError::agent_not_found(agent.id()));
            }
            agents.insert(*agent.id(), agent.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: &AgentId) -> Result<Option<AgentProfile>, DomainError> {
            Ok(self.agents.lock().unwrap().get(id).cloned())
        }
    }

    struct MockSessionRepo {
        sessions: Mutex<Vec<ConversationSession>>,
    }

    impl MockSessionRepo {
        fn empty() -> Self {
            Self {
                sessions: Mutex::new(Vec::new()),
            }
        }

        fn active_for(
            &self,
            participant_id: &ParticipantId,
            agent_id: &AgentId,
        ) -> Option<ConversationSession> {
            self.sessions
                .lock()
                .unwrap()
                .iter()
                .find(|s| {
                    s.is_active()
                        && s.participant_id() == participant_id
                        && s.agent_id() == agent_id
                })
                .cloned()
        }

        fn count(&self) -> usize {
            self.sessions.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl SessionRepository for MockSessionRepo {
        async fn save(&self, session: &ConversationSession) -> Result<(), DomainError> {
            let mut sessions = self.sessions.lock().unwrap();
            let duplicate = sessions.iter().any(|s| {
                s.is_active()
                    && s.participant_id() == session.participant_id()
                    && s.agent_id() == session.agent_id()
            });
            if duplicate {
                return Err(DomainError::new(
                    ErrorCode::DuplicateActiveSession,
                    "Active session already exists for pair",
                ));
            }
            sessions.push(session.clone());
            Ok(())
        }

        async fn update(&self, session: &ConversationSession) -> Result<(), DomainError> {
            let mut sessions = self.sessions.lock().unwrap();
            match sessions.iter_mut().find(|s| s.token() == session.token()) {
                Some(existing) => {
                    *existing = session.clone();
                    Ok(())
                }
                None => Err(DomainError::new(
                    ErrorCode::SessionNotFound,
                    "Session not found",
                )),
            }
        }

        async fn find_active_by_pair(
            &self,
            participant_id: &ParticipantId,
            agent_id: &AgentId,
        ) -> Result<Option<ConversationSession>, DomainError> {
            Ok(self.active_for(participant_id, agent_id))
        }
    }

    struct MockDirectory {
        profiles: HashMap<ParticipantId, ParticipantProfile>,
    }

    impl MockDirectory {
        fn empty() -> Self {
            Self {
                profiles: HashMap::new(),
            }
        }

        fn with_profile(profile: ParticipantProfile) -> Self {
            let mut profiles = HashMap::new();
            profiles.insert(profile.id.clone(), profile);
            Self { profiles }
        }
    }

    #[async_trait]
    impl ParticipantDirectory for MockDirectory {
        async fn lookup(
            &self,
            participant_id: &ParticipantId,
        ) -> Result<Option<ParticipantProfile>, DomainError> {
            Ok(self.profiles.get(participant_id).cloned())
        }
    }

    struct MockBackend {
        reply: Result<String, String>,
    }

    impl MockBackend {
        fn replying(reply: impl Into<String>) -> Self {
            Self {
                reply: Ok(reply.into()),
            }
        }

        fn failing(reason: impl Into<String>) -> Self {
            Self {
                reply: Err(reason.into()),
            }
        }
    }

    #[async_trait]
    impl GenerationBackend for MockBackend {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(reason) => Err(GenerationError::unavailable(reason.clone())),
            }
        }

        fn backend_info(&self) -> BackendInfo {
            BackendInfo::new("mock", "mock-model")
        }
    }

    fn benefits_agent() -> AgentProfile {
        let mut agent = AgentProfile::new(AgentId::new(), "Nova").unwrap();
        agent.replace_knowledge(vec![
            KnowledgeItem::new("benefits", "health and dental").unwrap()
        ]);
        agent
    }

    fn participant_id() -> ParticipantId {
        ParticipantId::new("emp-42").unwrap()
    }

    type TestHandler = ChatHandler<MockAgentRepo, MockSessionRepo, MockDirectory, MockBackend>;

    fn handler(
        agents: Arc<MockAgentRepo>,
        sessions: Arc<MockSessionRepo>,
        directory: MockDirectory,
        backend: MockBackend,
    ) -> TestHandler {
        ChatHandler::new(
            agents,
            sessions,
            Arc::new(directory),
            Arc::new(backend),
            Duration::from_secs(5),
        )
    }

    mod gating {
        use super::*;

        #[tokio::test]
        async fn rejects_empty_content() {
            let agent = benefits_agent();
            let agent_id = *agent.id();
            let handler = handler(
                Arc::new(MockAgentRepo::with_agent(agent)),
                Arc::new(MockSessionRepo::empty()),
                MockDirectory::empty(),
                MockBackend::replying("Hi"),
            );

            let result = handler
                .handle(ChatCommand::new(agent_id, participant_id(), "   \n\t  "))
                .await;

            assert!(matches!(result, Err(ChatError::EmptyContent)));
        }

        #[tokio::test]
        async fn rejects_unknown_agent() {
            let handler = handler(
                Arc::new(MockAgentRepo::with_agent(benefits_agent())),
                Arc::new(MockSessionRepo::empty()),
                MockDirectory::empty(),
                MockBackend::replying("Hi"),
            );

            let result = handler
                .handle(ChatCommand::new(AgentId::new(), participant_id(), "hello"))
                .await;

            assert!(matches!(result, Err(ChatError::AgentNotFound(_))));
        }

        #[tokio::test]
        async fn rejects_deactivated_agent() {
            let mut agent = benefits_agent();
            agent.deactivate().unwrap();
            let agent_id = *agent.id();
            let sessions = Arc::new(MockSessionRepo::empty());
            let handler = handler(
                Arc::new(MockAgentRepo::with_agent(agent)),
                Arc::clone(&sessions),
                MockDirectory::empty(),
                MockBackend::replying("Hi"),
            );

            let result = handler
                .handle(ChatCommand::new(agent_id, participant_id(), "hello"))
                .await;

            assert!(matches!(result, Err(ChatError::AgentInactive(_))));
            assert_eq!(sessions.count(), 0);
        }
    }

    mod turns {
        use super::*;

        #[tokio::test]
        async fn benefits_inquiry_turn_end_to_end() {
            let agent = benefits_agent();
            let agent_id = *agent.id();
            let agents = Arc::new(MockAgentRepo::with_agent(agent));
            let sessions = Arc::new(MockSessionRepo::empty());
            let handler = handler(
                Arc::clone(&agents),
                Arc::clone(&sessions),
                MockDirectory::empty(),
                MockBackend::replying("Your benefits include health and dental coverage."),
            );

            let result = handler
                .handle(ChatCommand::new(
                    agent_id,
                    participant_id(),
                    "What are my benefits?",
                ))
                .await
                .unwrap();

            assert_eq!(result.intent, Intent::BenefitsInquiry);
            assert!(!result.degraded);

            let session = sessions.active_for(&participant_id(), &agent_id).unwrap();
            assert_eq!(*session.token(), result.session_token);
            assert_eq!(session.message_count(), 2);

            let messages = session.messages();
            assert_eq!(messages[0].sender(), Sender::Participant);
            assert_eq!(messages[0].content(), "What are my benefits?");
            assert!(messages[0].metadata().is_none());

            assert_eq!(messages[1].sender(), Sender::Agent);
            let metadata = messages[1].metadata().unwrap();
            assert_eq!(metadata.intent, Intent::BenefitsInquiry);
            assert!((metadata.confidence - result.confidence).abs() < f64::EPSILON);

            assert_eq!(agents.agent(&agent_id).metrics().total_interactions(), 1);
        }

        #[tokio::test]
        async fn known_participant_personalizes_the_reply() {
            let agent = benefits_agent();
            let agent_id = *agent.id();
            let profile = ParticipantProfile::new(participant_id(), "Ava")
                .with_department("Engineering");
            let handler = handler(
                Arc::new(MockAgentRepo::with_agent(agent)),
                Arc::new(MockSessionRepo::empty()),
                MockDirectory::with_profile(profile),
                MockBackend::replying("Hello. Please check with your department."),
            );

            let result = handler
                .handle(ChatCommand::new(agent_id, participant_id(), "hello"))
                .await
                .unwrap();

            assert_eq!(
                result.content,
                "Hello Ava. Please check with the Engineering department."
            );
        }

        #[tokio::test]
        async fn second_turn_reuses_the_active_session() {
            let agent = benefits_agent();
            let agent_id = *agent.id();
            let sessions = Arc::new(MockSessionRepo::empty());
            let handler = handler(
                Arc::new(MockAgentRepo::with_agent(agent)),
                Arc::clone(&sessions),
                MockDirectory::empty(),
                MockBackend::replying("Sure."),
            );

            let first = handler
                .handle(ChatCommand::new(agent_id, participant_id(), "first message"))
                .await
                .unwrap();
            let second = handler
                .handle(ChatCommand::new(agent_id, participant_id(), "second message"))
                .await
                .unwrap();

            assert_eq!(first.session_token, second.session_token);
            assert_eq!(sessions.count(), 1);

            let session = sessions.active_for(&participant_id(), &agent_id).unwrap();
            assert_eq!(session.message_count(), 4);
            assert_eq!(session.messages()[0].content(), "first message");
            assert_eq!(session.messages()[2].content(), "second message");
        }

        #[tokio::test]
        async fn content_is_trimmed_before_processing() {
            let agent = benefits_agent();
            let agent_id = *agent.id();
            let sessions = Arc::new(MockSessionRepo::empty());
            let handler = handler(
                Arc::new(MockAgentRepo::with_agent(agent)),
                Arc::clone(&sessions),
                MockDirectory::empty(),
                MockBackend::replying("Sure."),
            );

            handler
                .handle(ChatCommand::new(agent_id, participant_id(), "  hello  "))
                .await
                .unwrap();

            let session = sessions.active_for(&participant_id(), &agent_id).unwrap();
            assert_eq!(session.messages()[0].content(), "hello");
        }
    }

    mod degradation {
        use super::*;

        #[tokio::test]
        async fn failed_generation_persists_the_participant_message() {
            let agent = benefits_agent();
            let agent_id = *agent.id();
            let agents = Arc::new(MockAgentRepo::with_agent(agent));
            let sessions = Arc::new(MockSessionRepo::empty());
            let handler = handler(
                Arc::clone(&agents),
                Arc::clone(&sessions),
                MockDirectory::empty(),
                MockBackend::failing("503"),
            );

            let result = handler
                .handle(ChatCommand::new(
                    agent_id,
                    participant_id(),
                    "What are my benefits?",
                ))
                .await
                .unwrap();

            assert!(result.degraded);
            assert_eq!(result.content, FALLBACK_REPLY);
            assert!((result.confidence - FALLBACK_CONFIDENCE).abs() < f64::EPSILON);

            let session = sessions.active_for(&participant_id(), &agent_id).unwrap();
            assert_eq!(session.message_count(), 2);
            assert_eq!(session.messages()[0].content(), "What are my benefits?");
            assert_eq!(session.messages()[1].content(), FALLBACK_REPLY);

            // A fallback turn still counts as a served interaction.
            assert_eq!(agents.agent(&agent_id).metrics().total_interactions(), 1);
        }
    }
}
