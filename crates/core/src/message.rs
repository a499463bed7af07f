//! Chat message model shared by prompts, memory and the LLM client.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Human,
    Ai,
}

impl Role {
    /// Role name on the Ollama chat wire format.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::Human => "user",
            Role::Ai => "assistant",
        }
    }

    /// Label used when a conversation is flattened into plain text.
    pub fn label(&self) -> &'static str {
        match self {
            Role::System => "System",
            Role::Human => "Human",
            Role::Ai => "AI",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self::new(Role::Human, content)
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self::new(Role::Ai, content)
    }

    /// Flatten messages into `Role: content` lines.
    pub fn render_transcript(messages: &[ChatMessage]) -> String {
        messages
            .iter()
            .map(|m| format!("{}: {}", m.role, m.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_transcript() {
        let messages = vec![
            ChatMessage::system("You are terse."),
            ChatMessage::human("What is OSPF?"),
            ChatMessage::ai("A link-state IGP."),
        ];
        assert_eq!(
            ChatMessage::render_transcript(&messages),
            "System: You are terse.\nHuman: What is OSPF?\nAI: A link-state IGP."
        );
    }

    #[test]
    fn test_wire_roles() {
        assert_eq!(Role::Human.as_wire(), "user");
        assert_eq!(Role::Ai.as_wire(), "assistant");
        assert_eq!(Role::System.as_wire(), "system");
    }
}
