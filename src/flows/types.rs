use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of web component the router can pick for a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Form,
    Card,
    Page,
    Authentication,
    UiElement,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Form,
        Category::Card,
        Category::Page,
        Category::Authentication,
        Category::UiElement,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Form => "form",
            Category::Card => "card",
            Category::Page => "page",
            Category::Authentication => "authentication",
            Category::UiElement => "ui-element",
            Category::Other => "other",
        }
    }

    /// Maps a model-produced label onto the closed set. Anything unrecognized
    /// becomes `Other`.
    pub fn from_label(label: &str) -> Category {
        let normalized = label
            .trim()
            .trim_matches(|c| c == '"' || c == '\'')
            .to_lowercase()
            .replace(['_', ' '], "-");

        match normalized.as_str() {
            "form" => Category::Form,
            "card" => Category::Card,
            "page" => Category::Page,
            "authentication" | "auth" => Category::Authentication,
            "ui-element" => Category::UiElement,
            _ => Category::Other,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    Component,
    ProductDescription,
    Text,
}

/// Output unit of a generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub content: String,
}

impl Artifact {
    pub fn new(kind: ArtifactKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }
}
