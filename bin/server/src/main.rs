use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voxgpt_ai::OpenAiChatBackend;
use voxgpt_server::config::ServerConfig;
use voxgpt_skill::SkillBuilder;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!(
        provider = config.llm.provider.as_str(),
        model = %config.llm.model,
        locales_dir = %config.skill.locales_dir.display(),
        followups = config.skill.enable_followup_suggestions,
        "Loaded configuration"
    );
    if config.llm.provider.requires_api_key() && config.llm.api_key().is_none() {
        tracing::warn!("No LLM API key configured; questions will not be answered");
    }

    let backend =
        OpenAiChatBackend::new(config.llm.clone()).expect("failed to create LLM backend");
    let skill = Arc::new(SkillBuilder::standard(&config.skill, Arc::new(backend)).build());
    let app = voxgpt_server::router(skill);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
