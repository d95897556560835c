//! Gamecraft Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gamecraft_engine::api;
use gamecraft_engine::app::App;
use gamecraft_engine::infrastructure::{
    clock::SystemClock,
    config::{EngineConfig, ExtractionMode},
    extraction::{LlmExtractor, RuleBasedExtractor},
    generator::FsProjectGenerator,
    ollama::OllamaClient,
    ports::{ClockPort, ExtractionPort},
    session_store::InMemorySessionStore,
    templates::TemplateRenderer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gamecraft_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Gamecraft Engine");

    let config = EngineConfig::from_env();

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

    let extraction: Arc<dyn ExtractionPort> = match config.extraction_mode {
        ExtractionMode::Rules => Arc::new(RuleBasedExtractor::new()),
        ExtractionMode::Llm => {
            let ollama = OllamaClient::with_timeout(
                &config.ollama_base_url,
                &config.ollama_model,
                config.ollama_timeout_secs,
            );
            tracing::info!(
                base_url = %config.ollama_base_url,
                model = %ollama.model(),
                timeout_secs = config.ollama_timeout_secs,
                "LLM extraction enabled, rules remain the fallback"
            );
            Arc::new(LlmExtractor::new(Arc::new(ollama)))
        }
    };

    tokio::fs::create_dir_all(&config.generated_games_dir).await?;
    tracing::info!(
        path = %config.generated_games_dir.display(),
        extraction = extraction.name(),
        max_suggestions = config.max_suggestions,
        "Projects will be written here"
    );

    let app = Arc::new(App::new(
        Arc::new(InMemorySessionStore::new(clock.clone())),
        extraction,
        Arc::new(TemplateRenderer::new()),
        Arc::new(FsProjectGenerator::new(config.generated_games_dir.clone())),
        clock,
        config.max_suggestions,
    ));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(config.cors_allowed_origins.as_deref()) {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = config.bind_address().parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
    // A .env next to the binary's working directory also counts.
    let _ = dotenvy::dotenv();
}

fn build_cors_layer(allowed_origins: Option<&str>) -> Option<CorsLayer> {
    let allowed_origins = allowed_origins?;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
