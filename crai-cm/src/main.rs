//! crai-cm - Comment Moderation Service
//!
//! Accepts free-text comments about films and books, classifies them with a
//! language model (sentiment, profanity, relevance, subject title, publish
//! decision), enriches identified titles from OMDb, and serves the analysis
//! history over HTTP.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crai_cm::services::analyzer::{AnalysisPolicy, CommentAnalyzer};
use crai_cm::services::judge::ChatCompletionJudge;
use crai_cm::services::title_lookup::TitleLookupClient;
use crai_cm::store::MemoryStore;
use crai_cm::AppState;
use crai_common::ServiceConfig;

/// Command-line arguments for crai-cm
#[derive(Parser, Debug)]
#[command(name = "crai-cm")]
#[command(about = "Comment moderation service for CRAI")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8000", env = "CRAI_CM_PORT")]
    port: u16,

    /// Host interface to bind
    #[arg(long, default_value = "127.0.0.1", env = "CRAI_CM_HOST")]
    host: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crai_cm=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = ServiceConfig::load().context("Failed to load configuration")?;

    info!("Starting crai-cm (Comment Moderation) service");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!(
        "Model endpoint: {} (model: {})",
        config.model_base_url, config.model_name
    );
    if config.omdb_api_key.is_none() {
        info!("OMDb API key not configured; title enrichment disabled");
    }

    let judge = ChatCompletionJudge::new(
        &config.model_base_url,
        &config.model_name,
        config.model_api_key.clone(),
        Duration::from_secs(config.model_timeout_secs),
    )
    .context("Failed to create model client")?;

    let lookup = TitleLookupClient::new(
        &config.omdb_base_url,
        config.omdb_api_key.clone(),
        Duration::from_secs(config.lookup_timeout_secs),
    )
    .context("Failed to create title lookup client")?;

    let policy = AnalysisPolicy {
        enrich_even_when_rejected: config.enrich_even_when_rejected,
        derive_publish: config.derive_publish,
    };

    // Create application state
    let analyzer = Arc::new(CommentAnalyzer::new(Arc::new(judge), Arc::new(lookup), policy));
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(analyzer, store);

    // Build router
    let app = crai_cm::build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port))
        .await
        .context("Failed to bind listener")?;
    info!("Listening on http://{}:{}", args.host, args.port);
    info!("Review UI: http://{}:{}/ui", args.host, args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
