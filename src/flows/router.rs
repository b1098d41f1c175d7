use super::{Category, complete_json, prompts};
use crate::{Error, Result, llm::LlmClient, validation::Prompt};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouterOutput {
    component_type: String,
}

/// Classifies prompts into a component [`Category`].
#[derive(Clone)]
pub struct Router {
    client: Arc<dyn LlmClient>,
}

impl Router {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub async fn route(&self, prompt: &Prompt) -> Result<Category> {
        let output: RouterOutput =
            complete_json(self.client.as_ref(), "router", prompts::router(prompt.as_str()))
                .await
                .map_err(|e| Error::classification(e.to_string()))?;

        let category = Category::from_label(&output.component_type);
        if category == Category::Other && output.component_type.trim() != "other" {
            debug!(
                "Router label '{}' is outside the known set, using 'other'",
                output.component_type
            );
        }

        info!("Prompt routed to category '{}'", category);
        Ok(category)
    }
}
