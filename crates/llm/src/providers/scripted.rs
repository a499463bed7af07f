//! Deterministic in-process LLM client.
//!
//! Replays queued responses in order and records every request it receives.
//! In echo mode an empty queue answers with the prompt text itself, which lets
//! the CLI show exactly what would be sent to the model.

use crate::client::{
    ChatRequest, LlmClient, LlmRequest, LlmResponse, LlmStream, LlmStreamChunk, LlmUsage,
};
use netassist_core::{AppError, AppResult, ChatMessage};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// A request observed by [`ScriptedClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedRequest {
    Complete(LlmRequest),
    Chat(ChatRequest),
}

impl RecordedRequest {
    /// Prompt text as the model would see it.
    pub fn text(&self) -> String {
        match self {
            RecordedRequest::Complete(req) => match &req.system {
                Some(system) => format!("System: {}\n{}", system, req.prompt),
                None => req.prompt.clone(),
            },
            RecordedRequest::Chat(req) => ChatMessage::render_transcript(&req.messages),
        }
    }

    /// Messages of a chat request, empty for completions.
    pub fn messages(&self) -> &[ChatMessage] {
        match self {
            RecordedRequest::Chat(req) => &req.messages,
            RecordedRequest::Complete(_) => &[],
        }
    }
}

#[derive(Default)]
pub struct ScriptedClient {
    responses: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<RecordedRequest>>,
    echo: bool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl ScriptedClient {
    /// Client that replays `responses` and errors once they run out.
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
            echo: false,
        }
    }

    /// Client that answers every request with its own prompt text.
    pub fn echo() -> Self {
        Self {
            echo: true,
            ..Self::default()
        }
    }

    /// Queue another response.
    pub fn push_response(&self, response: impl Into<String>) {
        lock(&self.responses).push_back(response.into());
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    pub fn remaining(&self) -> usize {
        lock(&self.responses).len()
    }

    fn next_response(&self, request: RecordedRequest) -> AppResult<String> {
        let fallback = request.text();
        lock(&self.requests).push(request);

        match lock(&self.responses).pop_front() {
            Some(response) => Ok(response),
            None if self.echo => Ok(fallback),
            None => Err(AppError::Llm(
                "scripted client has no responses left".to_string(),
            )),
        }
    }

    fn respond(model: &str, content: String) -> LlmResponse {
        LlmResponse {
            content,
            model: model.to_string(),
            usage: LlmUsage::default(),
            done: true,
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedClient {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        let content = self.next_response(RecordedRequest::Complete(request.clone()))?;
        Ok(Self::respond(&request.model, content))
    }

    async fn chat(&self, request: &ChatRequest) -> AppResult<LlmResponse> {
        let content = self.next_response(RecordedRequest::Chat(request.clone()))?;
        Ok(Self::respond(&request.model, content))
    }

    async fn stream(&self, request: &LlmRequest) -> AppResult<LlmStream> {
        let content = self.next_response(RecordedRequest::Complete(request.clone()))?;
        let model = request.model.clone();

        // One chunk per whitespace-separated word, then a final empty chunk.
        let mut chunks: Vec<AppResult<LlmStreamChunk>> = content
            .split_inclusive(' ')
            .map(|piece| {
                Ok(LlmStreamChunk {
                    content: piece.to_string(),
                    model: model.clone(),
                    done: false,
                    usage: None,
                })
            })
            .collect();
        chunks.push(Ok(LlmStreamChunk {
            content: String::new(),
            model,
            done: true,
            usage: Some(LlmUsage::default()),
        }));

        Ok(Box::pin(futures::stream::iter(chunks)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_replays_in_order_and_records() {
        let client = ScriptedClient::new(["first", "second"]);

        let a = client.complete(&LlmRequest::new("one", "m")).await.unwrap();
        let b = client
            .chat(&ChatRequest::new("m", vec![ChatMessage::human("two")]))
            .await
            .unwrap();

        assert_eq!(a.content, "first");
        assert_eq!(b.content, "second");

        let requests = client.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].text(), "one");
        assert_eq!(requests[1].messages()[0].content, "two");
    }

    #[tokio::test]
    async fn test_exhausted_queue_errors() {
        let client = ScriptedClient::new(Vec::<String>::new());
        let err = client.complete(&LlmRequest::new("x", "m")).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_echo_mode_returns_prompt() {
        let client = ScriptedClient::echo();
        let response = client
            .complete(&LlmRequest::new("Explain BGP", "m").with_system("Be brief"))
            .await
            .unwrap();
        assert_eq!(response.content, "System: Be brief\nExplain BGP");
    }

    #[tokio::test]
    async fn test_stream_reassembles_content() {
        let client = ScriptedClient::new(["link state routing"]);
        let mut stream = client.stream(&LlmRequest::new("x", "m")).await.unwrap();

        let mut text = String::new();
        let mut saw_done = false;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.unwrap();
            text.push_str(&chunk.content);
            saw_done |= chunk.done;
        }
        assert_eq!(text, "link state routing");
        assert!(saw_done);
    }
}
