use anyhow::Context;
use clap::Parser;
use story_scenes::{create_router, AppState, Config, FileArtifactStore, StoryService};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .init();

    // .env must be loaded before clap reads env fallbacks
    dotenvy::dotenv().ok();

    let config = Config::parse();

    info!("Starting Story Generator API...");

    let artifacts = FileArtifactStore::create(&config.output_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create output directory: {}",
                config.output_dir.display()
            )
        })?;

    let service = StoryService::from_gemini(&config.gemini(), artifacts.clone());
    let app = create_router(AppState::new(service, artifacts));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .context("Server terminated with error")
}
