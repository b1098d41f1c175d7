use ai_arena::{
    Error, Result,
    llm::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, LlmClient, Usage},
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Scripted LLM client: answers calls in order and records every request.
/// Clones share the same script and request log.
#[derive(Debug, Clone, Default)]
pub struct MockLlmClient {
    pub responses: Arc<Mutex<VecDeque<std::result::Result<String, String>>>>,
    pub requests: Arc<Mutex<Vec<ChatCompletionRequest>>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful answer with the given content.
    pub fn reply(self, content: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(content.into()));
        self
    }

    /// Queues a backend failure.
    pub fn fail(self, message: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.into()));
        self
    }

    pub fn get_requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Instruction text of the n-th call.
    pub fn prompt_of(&self, call: usize) -> String {
        self.get_requests()[call].messages[0].content.clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.requests.lock().unwrap().push(request);

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(content)) => Ok(create_mock_chat_response(&content)),
            Some(Err(message)) => Err(Error::llm(message)),
            None => Err(Error::llm("No more mock responses available")),
        }
    }
}

/// Client whose calls never complete. Used to hold a pipeline mid-flight.
#[derive(Debug, Clone, Default)]
pub struct StalledLlmClient {
    calls: Arc<AtomicUsize>,
    called: Arc<Notify>,
}

impl StalledLlmClient {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Resolves once a call has reached the backend.
    pub async fn wait_for_call(&self) {
        self.called.notified().await;
    }
}

#[async_trait]
impl LlmClient for StalledLlmClient {
    async fn create_chat_completion(
        &self,
        _request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.called.notify_one();
        std::future::pending().await
    }
}

pub fn create_mock_chat_response(content: &str) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: "chatcmpl-mock".to_string(),
        model: "gpt-4".to_string(),
        choices: vec![Choice {
            index: 0,
            message: ChatMessage::assistant(content),
            finish_reason: Some("Stop".to_string()),
        }],
        usage: Some(Usage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        }),
    }
}
