mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    load_from(&config_path).await
}

pub async fn load_from(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    parse(&config_str)
}

/// Parses and validates a YAML configuration document.
pub fn parse(config_str: &str) -> Result<Config> {
    let mut config: Config = serde_yaml::from_str(config_str)?;

    if config.llm.api_key.is_empty() {
        if let Ok(key) = env::var("OPENAI_API_KEY") {
            debug!("Using API key from OPENAI_API_KEY");
            config.llm.api_key = key;
        }
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.llm.model.trim().is_empty() {
        return Err(Error::config("llm.model must not be empty"));
    }
    if let Some(t) = config.llm.temperature {
        if !(0.0..=2.0).contains(&t) {
            return Err(Error::config(format!(
                "llm.temperature must be between 0 and 2, got {}",
                t
            )));
        }
    }
    if config.arena.models.is_empty() {
        return Err(Error::config("arena.models must list at least one model"));
    }
    Ok(())
}
