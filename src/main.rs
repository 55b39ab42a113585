//! Gangway server binary.
//!
//! Loads configuration, wires the in-memory adapters and the configured
//! generation/registry backends into the application handlers, and serves
//! the HTTP API.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use secrecy::ExposeSecret;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use gangway::adapters::generation::{GeminiBackend, GeminiConfig, MockGenerationBackend};
use gangway::adapters::http::{agent_routes, health_routes, AgentHandlers};
use gangway::adapters::memory::{
    InMemoryAgentRepository, InMemoryParticipantDirectory, InMemorySessionRepository,
};
use gangway::adapters::registry::{HttpAgentRegistry, HttpRegistryConfig, NullAgentRegistry};
use gangway::application::handlers::{
    ChatHandler, CreateAgentHandler, DeactivateAgentHandler, GetConversationHandler,
};
use gangway::config::{AppConfig, GenerationConfig, GenerationProvider, RegistryConfig};
use gangway::ports::{
    AgentRegistry, AgentRepository, GenerationBackend, ParticipantDirectory, SessionRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    config.validate()?;

    let app = build_app(&config);
    let addr = config.server.socket_addr()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "gangway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("gangway stopped");
    Ok(())
}

/// Wires adapters into handlers and assembles the router.
fn build_app(config: &AppConfig) -> Router {
    let agents: Arc<dyn AgentRepository> = Arc::new(InMemoryAgentRepository::new());
    let sessions: Arc<dyn SessionRepository> = Arc::new(InMemorySessionRepository::new());
    let directory: Arc<dyn ParticipantDirectory> = Arc::new(InMemoryParticipantDirectory::new());

    let generation = build_generation_backend(&config.generation);
    let registry = build_registry(&config.registry);

    let info = generation.backend_info();
    tracing::info!(backend = %info.name, model = %info.model, "generation backend ready");

    let handlers = AgentHandlers::new(
        Arc::new(CreateAgentHandler::new(Arc::clone(&agents), registry)),
        Arc::new(ChatHandler::new(
            Arc::clone(&agents),
            Arc::clone(&sessions),
            directory,
            generation,
            config.generation.timeout(),
        )),
        Arc::new(GetConversationHandler::new(
            Arc::clone(&agents),
            Arc::clone(&sessions),
        )),
        Arc::new(DeactivateAgentHandler::new(agents)),
    );

    Router::new()
        .nest("/api/agents", agent_routes(handlers))
        .merge(health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
}

/// Selects the generation backend from configuration.
///
/// `validate()` has already required an API key for the Gemini provider.
fn build_generation_backend(config: &GenerationConfig) -> Arc<dyn GenerationBackend> {
    match config.provider {
        GenerationProvider::Gemini => {
            let api_key = config
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().clone())
                .unwrap_or_default();
            let gemini_config = GeminiConfig::new(api_key)
                .with_model(config.model.clone())
                .with_base_url(config.base_url.clone())
                .with_timeout(config.timeout());
            Arc::new(GeminiBackend::new(gemini_config))
        }
        GenerationProvider::Mock => Arc::new(MockGenerationBackend::new()),
    }
}

/// Selects the registry adapter from configuration.
fn build_registry(config: &RegistryConfig) -> Arc<dyn AgentRegistry> {
    match &config.endpoint {
        Some(endpoint) if !endpoint.is_empty() => {
            tracing::info!(%endpoint, "agent registry enabled");
            let registry_config =
                HttpRegistryConfig::new(endpoint.clone()).with_timeout(config.timeout());
            Arc::new(HttpAgentRegistry::new(registry_config))
        }
        _ => {
            tracing::info!("no registry endpoint configured; agents stay unregistered");
            Arc::new(NullAgentRegistry::new())
        }
    }
}

/// Builds the CORS layer from configured origins (permissive when none).
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Resolves when SIGINT or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install ctrl-c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::warn!(error = %e, "failed to install sigterm handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
