use super::{complete_json, prompts};
use crate::{Error, Result, llm::LlmClient};
use regex::Regex;
use serde::Deserialize;
use std::sync::{Arc, LazyLock};
use tracing::debug;

/// Fence tags whose interior is treated as code by [`extract_code_block`].
pub const CODE_LANGUAGES: [&str; 6] = ["jsx", "tsx", "javascript", "js", "typescript", "ts"];

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?s)```(?:{})[ \t]*\r?\n(.*?)```",
        CODE_LANGUAGES.join("|")
    ))
    .expect("code fence pattern is valid")
});

/// Returns the trimmed interior of the first fenced block tagged with a known
/// code language, or `text` unchanged when there is none.
pub fn extract_code_block(text: &str) -> String {
    match CODE_FENCE.captures(text).and_then(|c| c.get(1)) {
        Some(body) => body.as_str().trim().to_string(),
        None => text.to_string(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormatterOutput {
    formatted_code_snippet: String,
}

/// Reshapes raw model output into a clean snippet.
#[derive(Clone)]
pub struct Formatter {
    client: Arc<dyn LlmClient>,
}

impl Formatter {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    pub async fn format(&self, raw_response: &str, target_shape: &str) -> Result<String> {
        let output: FormatterOutput = complete_json(
            self.client.as_ref(),
            "formatter",
            prompts::formatter(raw_response, target_shape),
        )
        .await
        .map_err(|e| Error::formatting(e.to_string()))?;

        let snippet = extract_code_block(&output.formatted_code_snippet);
        debug!(
            "Formatter produced {} bytes ({} after extraction)",
            output.formatted_code_snippet.len(),
            snippet.len()
        );
        Ok(snippet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn text_without_fence_is_unchanged() {
        let text = "const X = () => null;\nexport default X;";
        assert_eq!(extract_code_block(text), text);
    }

    #[test]
    fn sole_jsx_block_yields_interior() {
        let text = "```jsx\n  const X=()=>null;  \n```";
        assert_eq!(extract_code_block(text), "const X=()=>null;");
    }

    #[test]
    fn surrounding_prose_is_dropped() {
        let text = "Here is code:\n```jsx\nconst X=()=>null;\n```\nDone.";
        assert_eq!(extract_code_block(text), "const X=()=>null;");
    }

    #[rstest]
    #[case("tsx")]
    #[case("javascript")]
    #[case("js")]
    #[case("typescript")]
    #[case("ts")]
    fn every_known_language_is_extracted(#[case] lang: &str) {
        let text = format!("intro\n```{lang}\nlet a = 1;\n```");
        assert_eq!(extract_code_block(&text), "let a = 1;");
    }

    #[test]
    fn unknown_language_fence_is_left_alone() {
        let text = "```python\nprint(1)\n```";
        assert_eq!(extract_code_block(text), text);
    }

    #[test]
    fn first_matching_block_wins() {
        let text = "```css\na{}\n```\n```tsx\nfirst\n```\n```jsx\nsecond\n```";
        assert_eq!(extract_code_block(text), "first");
    }
}
