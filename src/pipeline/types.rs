use crate::flows::{ArtifactKind, Category};
use serde::{Deserialize, Serialize};

/// Prompt-driven request types handled by [`super::Arena::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestKind {
    /// Route, generate a component, then format it.
    #[default]
    Component,
    /// Generate a UI element without routing, then format it.
    UiElement,
    /// Free-text answer.
    Text,
}

impl RequestKind {
    pub fn needs_routing(&self) -> bool {
        matches!(self, RequestKind::Component)
    }

    pub fn produces_code(&self) -> bool {
        matches!(self, RequestKind::Component | RequestKind::UiElement)
    }

    /// Text added to the transcript for the user's turn.
    pub fn user_message(&self, prompt: &str) -> String {
        match self {
            RequestKind::UiElement => format!("Generate UI for: {prompt}"),
            RequestKind::Component | RequestKind::Text => prompt.to_string(),
        }
    }
}

/// Model settings chosen in the UI. Accepted and logged but not forwarded
/// to the backend calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl GenerationParams {
    pub fn is_empty(&self) -> bool {
        self.model.is_none() && self.temperature.is_none() && self.max_tokens.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(default)]
    pub kind: RequestKind,
    pub prompt: String,
    /// Skips routing when set.
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub params: GenerationParams,
}

impl GenerationRequest {
    pub fn new(kind: RequestKind, prompt: impl Into<String>) -> Self {
        Self {
            kind,
            prompt: prompt.into(),
            ..Default::default()
        }
    }

    pub fn component(prompt: impl Into<String>) -> Self {
        Self::new(RequestKind::Component, prompt)
    }
}

/// Result of a completed pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutcome {
    pub kind: ArtifactKind,
    pub output: String,
    pub category: Option<Category>,
    /// True when formatting failed and `output` is a placeholder message.
    pub degraded: bool,
}
