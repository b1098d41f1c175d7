use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub arena: ArenaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    pub model: String,
    /// Sampling temperature used for every pipeline call.
    #[serde(default)]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
    #[serde(default = "default_true")]
    pub cors_allow_any_origin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaConfig {
    #[serde(default = "default_models")]
    pub models: Vec<ModelOption>,
    #[serde(default = "default_templates")]
    pub templates: Vec<PromptTemplate>,
    /// Run the formatter stage over generated components.
    #[serde(default = "default_true")]
    pub format_code: bool,
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

/// Entry of the model selector shown by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelOption {
    pub id: String,
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub id: String,
    pub name: String,
    pub content: String,
}

impl PromptTemplate {
    /// Prefixes the template content to the user's input.
    pub fn apply(&self, input: &str) -> String {
        format!("{}{}", self.content, input)
    }
}

impl ArenaConfig {
    pub fn find_template(&self, id: &str) -> Option<&PromptTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn find_model(&self, id: &str) -> Option<&ModelOption> {
        self.models.iter().find(|m| m.id == id)
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            models: default_models(),
            templates: default_templates(),
            format_code: true,
            greeting: default_greeting(),
        }
    }
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_icon() -> String {
    "Sparkles".to_string()
}

fn default_greeting() -> String {
    "Hello! I'm your AI assistant. Select a model, choose a template, or write your own prompt to get started.".to_string()
}

fn default_models() -> Vec<ModelOption> {
    [
        ("gpt-4", "GPT-4", "Sparkles"),
        ("gpt-3.5-turbo", "GPT-3.5-Turbo", "Sparkles"),
        ("custom-model-1", "Custom Fine-Tuned", "BrainCircuit"),
    ]
    .into_iter()
    .map(|(id, name, icon)| ModelOption {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
    })
    .collect()
}

fn default_templates() -> Vec<PromptTemplate> {
    [
        (
            "summarize",
            "Summarize Text",
            "Summarize the following text into three key points: \n\n",
        ),
        (
            "code-explain",
            "Explain Code Snippet",
            "Explain the following code snippet in plain English, focusing on its purpose and functionality: \n\n",
        ),
        (
            "translate-js-to-python",
            "Translate JS to Python",
            "Translate the following JavaScript code to its Python equivalent: \n\n",
        ),
        (
            "social-media-post",
            "Generate Social Media Post",
            "Create a short, engaging Twitter post about the following topic: \n\n",
        ),
        (
            "define-word",
            "Define a Word",
            "What is the meaning of the word: \n\n",
        ),
    ]
    .into_iter()
    .map(|(id, name, content)| PromptTemplate {
        id: id.to_string(),
        name: name.to_string(),
        content: content.to_string(),
    })
    .collect()
}
