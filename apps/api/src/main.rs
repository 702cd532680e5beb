mod classification;
mod config;
mod errors;
mod llm_client;
mod routes;
mod state;
mod taxonomy;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::classification::compatibility::CompatibilityValidator;
use crate::classification::engine::ClassificationEngine;
use crate::classification::ClassifierSettings;
use crate::config::Config;
use crate::llm_client::{DisabledGenerator, LlmClient, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;
use crate::taxonomy::TaxonomyIndex;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SS-Finder API v{}", env!("CARGO_PKG_VERSION"));

    // Load reference data. Any taxonomy problem is fatal.
    let index = TaxonomyIndex::load(
        &config.industry_taxonomy_path,
        &config.occupation_taxonomy_path,
    )
    .context("Failed to load taxonomy tables")?;

    let compatibility = match &config.compatibility_table_path {
        Some(path) => CompatibilityValidator::load_json(path)
            .context("Failed to load compatibility table")?,
        None => CompatibilityValidator::builtin(),
    };
    info!("Compatibility rules: {}", compatibility.rule_count());

    // Initialize the AI capability (disabled when no key is configured)
    let generator: Arc<dyn TextGenerator> = match &config.anthropic_api_key {
        Some(key) => {
            let llm = LlmClient::new(key.clone(), Duration::from_secs(config.ai_timeout_secs));
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Arc::new(llm)
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; AI disabled, classification is lexical only");
            Arc::new(DisabledGenerator)
        }
    };

    let engine = ClassificationEngine::new(
        Arc::new(index),
        generator,
        compatibility,
        ClassifierSettings::from_config(&config),
    );

    // Build app state
    let shutdown = CancellationToken::new();
    let state = AppState {
        engine: Arc::new(engine),
        config: config.clone(),
        shutdown: shutdown.clone(),
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for Ctrl+C, then cancels the shared token so running batches stop
/// starting new records while in-flight requests drain.
async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C ({e}); shutdown must be forced");
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down");
    shutdown.cancel();
}
