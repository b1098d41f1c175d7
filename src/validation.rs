//! Input checks that run before any backend call.

use crate::{Error, Result};
use serde::Serialize;
use std::fmt;

pub const EMPTY_PROMPT: &str = "Prompt cannot be empty.";
pub const EMPTY_PRODUCT_NAME: &str = "Product name cannot be empty.";
pub const EMPTY_KEYWORDS: &str = "Keywords cannot be empty.";

/// User prompt that is known to contain more than whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Prompt(String);

impl Prompt {
    pub fn parse(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(Error::validation(EMPTY_PROMPT));
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    pub product_name: String,
    pub keywords: String,
}

impl ProductInput {
    /// Reports every missing field at once, joined by ", ".
    pub fn parse(product_name: &str, keywords: &str) -> Result<Self> {
        let mut problems = Vec::new();
        if product_name.trim().is_empty() {
            problems.push(EMPTY_PRODUCT_NAME);
        }
        if keywords.trim().is_empty() {
            problems.push(EMPTY_KEYWORDS);
        }
        if !problems.is_empty() {
            return Err(Error::validation(problems.join(", ")));
        }

        Ok(Self {
            product_name: product_name.to_string(),
            keywords: keywords.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case(" ")]
    #[case("\n\t  ")]
    fn blank_prompts_are_rejected(#[case] input: &str) {
        let err = Prompt::parse(input).unwrap_err();
        assert_eq!(err.to_string(), EMPTY_PROMPT);
    }

    #[test]
    fn prompt_keeps_original_text() {
        let prompt = Prompt::parse("  Create a login form ").unwrap();
        assert_eq!(prompt.as_str(), "  Create a login form ");
    }

    #[test]
    fn product_input_reports_all_missing_fields() {
        let err = ProductInput::parse("", " ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Product name cannot be empty., Keywords cannot be empty."
        );

        let err = ProductInput::parse("Mug", "").unwrap_err();
        assert_eq!(err.to_string(), EMPTY_KEYWORDS);

        assert!(ProductInput::parse("Mug", "ceramic, handmade").is_ok());
    }
}
