use super::{Artifact, ArtifactKind, Category, complete_json, prompts};
use crate::{
    Error, Result,
    llm::LlmClient,
    validation::{ProductInput, Prompt},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
struct ComponentOutput {
    component: String,
}

#[derive(Debug, Deserialize)]
struct DescriptionOutput {
    description: String,
}

#[derive(Debug, Deserialize)]
struct TextOutput {
    response: String,
}

/// Produces the primary artifact of a request.
#[derive(Clone)]
pub struct Generator {
    client: Arc<dyn LlmClient>,
}

impl Generator {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// Generates a React component. The category is only a hint; `None`
    /// still yields a best-effort component.
    pub async fn generate_component(
        &self,
        prompt: &Prompt,
        category: Option<Category>,
    ) -> Result<Artifact> {
        info!(
            "Generating component (category: {})",
            category.map(|c| c.as_str()).unwrap_or("none")
        );

        let output: ComponentOutput = complete_json(
            self.client.as_ref(),
            "generator",
            prompts::component(prompt.as_str(), category),
        )
        .await
        .map_err(generation_error)?;

        non_empty(ArtifactKind::Component, output.component)
    }

    /// Generates a standalone UI element from a short description.
    pub async fn generate_ui_element(&self, description: &Prompt) -> Result<Artifact> {
        let wrapped = Prompt::parse(&prompts::ui_element_request(description.as_str()))?;
        self.generate_component(&wrapped, Some(Category::UiElement))
            .await
    }

    pub async fn generate_product_description(&self, input: &ProductInput) -> Result<Artifact> {
        info!("Generating product description for '{}'", input.product_name);

        let output: DescriptionOutput = complete_json(
            self.client.as_ref(),
            "product description",
            prompts::product_description(&input.product_name, &input.keywords),
        )
        .await
        .map_err(generation_error)?;

        non_empty(ArtifactKind::ProductDescription, output.description)
    }

    pub async fn generate_text(&self, prompt: &Prompt) -> Result<Artifact> {
        let output: TextOutput = complete_json(
            self.client.as_ref(),
            "text",
            prompts::text(prompt.as_str()),
        )
        .await
        .map_err(generation_error)?;

        non_empty(ArtifactKind::Text, output.response)
    }
}

fn generation_error(e: Error) -> Error {
    match e {
        Error::OpenAi(inner) => Error::generation(inner.to_string()),
        Error::Llm(msg) => Error::generation(msg),
        other => Error::generation(other.to_string()),
    }
}

fn non_empty(kind: ArtifactKind, content: String) -> Result<Artifact> {
    if content.trim().is_empty() {
        return Err(Error::generation("The model returned an empty response."));
    }
    Ok(Artifact::new(kind, content))
}
