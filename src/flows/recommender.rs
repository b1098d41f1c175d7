use super::{complete_json, prompts};
use crate::{Error, Result, llm::LlmClient, validation::Prompt};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct RecommendationOutput {
    recommendations: String,
}

/// Suggests models and parameter settings for a prompt.
#[derive(Clone)]
pub struct Recommender {
    client: Arc<dyn LlmClient>,
}

impl Recommender {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub async fn recommend(&self, prompt: &Prompt) -> Result<String> {
        let output: RecommendationOutput = complete_json(
            self.client.as_ref(),
            "recommender",
            prompts::recommendation(prompt.as_str()),
        )
        .await
        .map_err(|e| Error::recommendation(e.to_string()))?;

        Ok(output.recommendations)
    }
}
