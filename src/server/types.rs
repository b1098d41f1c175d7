use crate::{
    config::{ModelOption, PromptTemplate},
    flows::{ArtifactKind, Category},
    pipeline::{GenerationRequest, PipelineOutcome},
    session::{Message, Transcript},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    #[serde(default)]
    pub session_id: Option<String>,
    /// Template whose content is prefixed to the prompt.
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(flatten)]
    pub request: GenerationRequest,
}

#[derive(Debug, Deserialize)]
pub struct DescriptionBody {
    #[serde(default)]
    pub session_id: Option<String>,
    pub product_name: String,
    pub keywords: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationBody {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct FormatBody {
    pub raw_response: String,
    pub target: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub kind: ArtifactKind,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub degraded: bool,
    /// Committed history; absent for requests made without a session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<Vec<Message>>,
}

impl GenerateResponse {
    pub fn new(outcome: PipelineOutcome, session: Option<(String, Transcript)>) -> Self {
        let (session_id, transcript) = match session {
            Some((session_id, transcript)) => {
                (Some(session_id), Some(transcript.messages().to_vec()))
            }
            None => (None, None),
        };
        Self {
            session_id,
            kind: outcome.kind,
            output: outcome.output,
            category: outcome.category,
            degraded: outcome.degraded,
            transcript,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub messages: Vec<Message>,
    pub pending: Option<Message>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: String,
}

#[derive(Debug, Serialize)]
pub struct FormatResponse {
    pub formatted: String,
}

#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelOption>,
}

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub templates: Vec<PromptTemplate>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub title: String,
    pub error: String,
}
