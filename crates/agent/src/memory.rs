//! Conversation memory.
//!
//! A [`ChatHistory`] holds the turns of one conversation. [`SessionStore`]
//! keeps one history per session id, and [`ConversationChain`] replays the
//! session's history into the prompt on every call.

use crate::chain::ChatChain;
use netassist_core::{AppResult, ChatMessage};
use netassist_prompt::vars;
use std::collections::BTreeMap;

/// Ordered messages of one conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::human(content));
    }

    pub fn add_ai(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::ai(content));
    }

    /// Record a question and its answer.
    pub fn add_turn(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.add_user(question);
        self.add_ai(answer);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Number of messages (two per turn).
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Histories keyed by session id.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: BTreeMap<String, ChatHistory>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The history for `session_id`, created empty on first use.
    pub fn get_or_create(&mut self, session_id: &str) -> &mut ChatHistory {
        self.sessions.entry(session_id.to_string()).or_default()
    }

    pub fn get(&self, session_id: &str) -> Option<&ChatHistory> {
        self.sessions.get(session_id)
    }

    pub fn session_ids(&self) -> impl Iterator<Item = &str> {
        self.sessions.keys().map(String::as_str)
    }
}

pub const DEFAULT_SESSION: &str = "default";

/// Chat chain whose `history` placeholder is filled from a session.
pub struct ConversationChain {
    chain: ChatChain,
    history_key: String,
    sessions: SessionStore,
}

impl ConversationChain {
    /// `history_key` names the placeholder in the chain's prompt.
    pub fn new(chain: ChatChain, history_key: impl Into<String>) -> Self {
        Self {
            chain,
            history_key: history_key.into(),
            sessions: SessionStore::new(),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Ask `question` in `session_id` and record both turns.
    ///
    /// A failed model call leaves the history unchanged.
    pub async fn chat(&mut self, question: &str, session_id: &str) -> AppResult<String> {
        let history = self.sessions.get_or_create(session_id);

        tracing::debug!(
            session = session_id,
            messages = history.len(),
            "Replaying conversation history"
        );

        let answer = self
            .chain
            .invoke_with_history(
                &vars([("question", question)]),
                &[(self.history_key.as_str(), history.messages())],
            )
            .await?;

        history.add_turn(question, answer.as_str());
        Ok(answer)
    }
}
