//! Single-call stages of the generation pipeline.
//!
//! Every stage sends one templated request to the model, asks for a JSON
//! object back and deserializes it into a typed output. Stages hold no
//! state between calls.

mod formatter;
mod generator;
pub mod prompts;
mod recommender;
mod router;
mod types;

pub use formatter::{CODE_LANGUAGES, Formatter, extract_code_block};
pub use generator::Generator;
pub use recommender::Recommender;
pub use router::Router;
pub use types::{Artifact, ArtifactKind, Category};

use crate::{
    Error, Result,
    llm::{ChatCompletionRequest, ChatMessage, LlmClient},
};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Sends `instructions` as a single user turn and parses the JSON answer.
pub(crate) async fn complete_json<T: DeserializeOwned>(
    client: &dyn LlmClient,
    stage: &str,
    instructions: String,
) -> Result<T> {
    let request = ChatCompletionRequest::json(vec![ChatMessage::user(instructions)]);

    let response = client.create_chat_completion(request).await?;
    let content = response
        .first_content()
        .ok_or_else(|| Error::llm(format!("{} returned no choices", stage)))?;

    debug!("{} raw output: {} bytes", stage, content.len());

    serde_json::from_str(strip_json_fence(content)).map_err(|e| {
        Error::llm(format!(
            "{} output did not match the expected schema: {}",
            stage, e
        ))
    })
}

/// Some backends wrap JSON mode answers in a ```json fence anyway.
fn strip_json_fence(content: &str) -> &str {
    let trimmed = content.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}
