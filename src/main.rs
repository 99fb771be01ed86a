use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use pravas::http::{create_router, AppState};
use pravas::model::{EntryStore, MemoryStore};
use pravas::pipeline::{build_provider, HttpAudioFetcher, TranscriptionPipeline};
use pravas::Config;

#[derive(Debug, Parser)]
#[command(name = "pravas", about = "Travel-diary voice memo service")]
struct Args {
    /// Configuration file (without extension)
    #[arg(long, default_value = "config/pravas")]
    config: String,

    /// Override the configured HTTP port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;
    let port = args.port.unwrap_or(cfg.service.http.port);

    info!("{} v0.1.0", cfg.service.name);
    info!("Speech provider: {}", cfg.providers.default);
    info!(
        "Languages: {} -> {}",
        cfg.languages.source, cfg.languages.target
    );

    let client = reqwest::Client::new();

    let provider = build_provider(client.clone(), &cfg.providers, &cfg.languages)?;
    let fetcher = Arc::new(HttpAudioFetcher::new(client));
    // The relational database is an external collaborator; the in-memory
    // store backs local development.
    let store: Arc<dyn EntryStore> = Arc::new(MemoryStore::new());

    let pipeline = Arc::new(TranscriptionPipeline::new(
        Arc::clone(&store),
        fetcher,
        provider,
        cfg.languages.clone(),
    ));

    let app = create_router(AppState::new(store, pipeline));

    let addr = format!("{}:{}", cfg.service.http.bind, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
