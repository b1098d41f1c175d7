//! Instruction templates for every model call made by the pipeline.
//!
//! Each template ends with the JSON shape the answer must take; the
//! matching output struct lives next to the stage that parses it.

use super::Category;

pub fn router(prompt: &str) -> String {
    format!(
        r#"You are a prompt routing expert. Your job is to analyze the user's prompt and determine what kind of web component they want to create.

Categorize the prompt into exactly one of the following types: "form", "card", "page", "authentication", "ui-element", or "other". Use "other" when the prompt is ambiguous.

Respond with a JSON object of the form {{"componentType": "<type>"}}.

Prompt:
{prompt}"#
    )
}

pub fn component(prompt: &str, category: Option<Category>) -> String {
    let hint = match category {
        Some(category) => format!(
            "The user wants to create a '{category}' component. Use this as a hint to generate the most relevant component."
        ),
        None => "No component type is known for this request. Infer the most relevant kind of component from the prompt.".to_string(),
    };

    format!(
        r#"You are an expert React developer. Generate a single React functional component based on the following prompt.

Your component code must contain no extra explanations or markdown.

The component should use Tailwind CSS for styling and leverage shadcn/ui components and lucide-react icons where appropriate.
Ensure the component is well-structured, follows modern React best practices, and is production-ready.
Do not include any 'use client' directives. Components should be server components by default unless client-side interactivity is absolutely required.

{hint}

Respond with a JSON object of the form {{"component": "<component code>"}}.

Prompt:
{prompt}"#
    )
}

/// Wraps a UI-element request before it reaches the component template.
pub fn ui_element_request(description: &str) -> String {
    format!(
        "Create a new React component for a UI element based on the following description: {description}. The component should be visually appealing and ready for production."
    )
}

pub fn product_description(product_name: &str, keywords: &str) -> String {
    format!(
        r#"You are a marketing expert. Generate a compelling product description for the following product.

Product Name: {product_name}
Keywords: {keywords}

The description must contain no extra explanations or markdown.

Respond with a JSON object of the form {{"description": "<product description>"}}."#
    )
}

pub fn text(prompt: &str) -> String {
    format!(
        r#"You are a helpful AI assistant. Respond to the following prompt.

Respond with a JSON object of the form {{"response": "<your answer>"}}.

Prompt:
{prompt}"#
    )
}

pub fn recommendation(prompt: &str) -> String {
    format!(
        r#"You are an AI expert. Analyze the user's prompt and recommend the most appropriate AI models and parameter settings to improve the quality and relevance of the generated results. Provide specific model names and parameter settings (e.g., temperature, max tokens) along with a brief justification for each recommendation.

Respond with a JSON object of the form {{"recommendations": "<recommendations as plain text>"}}.

The user's prompt is: {prompt}"#
    )
}

pub fn formatter(raw_response: &str, target_shape: &str) -> String {
    format!(
        r#"You are a formatting expert whose job is to take an LLM response and format it into a clean, short, usable code snippet.

The user provides the raw response and a description of the desired output schema. You must return a code snippet that adheres to the schema.

Respond with a JSON object of the form {{"formattedCodeSnippet": "<code snippet>"}}.

Here is the desired schema:
{target_shape}

Here is the raw response to format:
{raw_response}"#
    )
}
