use ai_arena::{config, server};
use anyhow::Result;
use tracing::info;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration comes first so the log level can be taken from it
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let env_level = std::env::var("RUST_LOG").ok();
    let log_level = env_level
        .clone()
        .unwrap_or_else(|| config.server.logs.level.clone());

    // A full filter directive in RUST_LOG is handed to EnvFilter as is
    if env_level.is_none() {
        if let Err(e) = validate_log_level(&log_level) {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();

    info!("Starting AI Arena server with log level: {}", log_level);
    info!(
        "Configuration loaded: {} models, {} templates",
        config.arena.models.len(),
        config.arena.templates.len()
    );

    server::run(config).await?;

    Ok(())
}
