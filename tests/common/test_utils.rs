use super::MockLlmClient;
use ai_arena::{
    config::{ArenaConfig, Config, LlmConfig, LogsConfig, ServerConfig},
    llm::LlmClient,
    pipeline::Arena,
};
use serde_json::json;
use std::sync::Arc;

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
            cors_allow_any_origin: true,
        },
        llm: LlmConfig {
            provider: "openai".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: "test-api-key".to_string(),
            model: "gpt-4".to_string(),
            temperature: None,
        },
        arena: ArenaConfig::default(),
    }
}

pub fn create_test_arena(mock: &MockLlmClient) -> Arena {
    Arena::with_client(Arc::new(mock.clone()), &ArenaConfig::default())
}

pub fn create_test_arena_with(client: Arc<dyn LlmClient>) -> Arena {
    Arena::with_client(client, &ArenaConfig::default())
}

pub fn create_test_arena_without_formatting(mock: &MockLlmClient) -> Arena {
    let config = ArenaConfig {
        format_code: false,
        ..ArenaConfig::default()
    };
    Arena::with_client(Arc::new(mock.clone()), &config)
}

pub fn router_reply(label: &str) -> String {
    json!({ "componentType": label }).to_string()
}

pub fn component_reply(code: &str) -> String {
    json!({ "component": code }).to_string()
}

pub fn formatter_reply(snippet: &str) -> String {
    json!({ "formattedCodeSnippet": snippet }).to_string()
}

pub fn description_reply(text: &str) -> String {
    json!({ "description": text }).to_string()
}

pub fn text_reply(text: &str) -> String {
    json!({ "response": text }).to_string()
}

pub fn recommendation_reply(text: &str) -> String {
    json!({ "recommendations": text }).to_string()
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 9090
  logs:
    level: "debug"

llm:
  provider: "openai"
  base_url: "http://localhost:11434/v1"
  api_key: "test-api-key"
  model: "gpt-4o-mini"
  temperature: 0.3

arena:
  format_code: false
  greeting: "Welcome to the arena."
  models:
    - id: "gpt-4o-mini"
      name: "GPT-4o mini"
  templates:
    - id: "define-word"
      name: "Define a Word"
      content: "What is the meaning of the word: "
"#;
