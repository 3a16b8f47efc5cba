//! Headless host entry point.
//!
//! Seeds the in-memory stores with a demo campaign and plays it through the
//! runtime with scripted input, logging every event.
mod campaign;
mod config;
mod events;
mod script;

use std::time::Duration;

use anyhow::{Context, Result};
use campaign::{Campaign, PLAYER_ID};
use config::CliConfig;
use runtime::{InMemoryLevelStore, InMemoryPlayerStore, InMemoryPuzzleStore, Runtime};
use script::Script;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::from_env();
    let campaign = Campaign::demo(&config.player_name);

    if let Some(path) = &config.campaign_dump {
        let json = serde_json::to_string_pretty(&campaign)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("Campaign written to {}", path.display());
    }

    let runtime = Runtime::builder()
        .config(config.runtime.clone())
        .player(PLAYER_ID)
        .stores(
            InMemoryPlayerStore::with_players([campaign.player.clone()]),
            InMemoryLevelStore::with_levels(campaign.levels.clone()),
            InMemoryPuzzleStore::with_puzzles(campaign.puzzles.clone()),
        )
        .build()
        .await?;

    let loggers = events::spawn_event_logger(&runtime.handle());
    let outcome = Script::new(runtime.handle(), &campaign, &config).run().await;

    runtime.shutdown().await?;
    for logger in loggers {
        let _ = tokio::time::timeout(Duration::from_secs(1), logger).await;
    }

    let finished = outcome?;
    tracing::info!(
        "Campaign complete: {} finished with {} points",
        finished.player.name,
        finished.player.total_score
    );
    Ok(())
}
