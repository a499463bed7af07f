//! Chat prompt templates: an ordered list of role-tagged message templates.

use crate::template::{check_variables, extract_variables, render_template, PromptVars};
use netassist_core::{AppError, AppResult, ChatMessage, Role};

/// One entry of a chat template.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageTemplate {
    System(String),
    Human(String),
    Ai(String),
    /// Expands to a message history supplied at format time.
    Placeholder(String),
}

impl MessageTemplate {
    fn role_and_text(&self) -> Option<(Role, &str)> {
        match self {
            MessageTemplate::System(text) => Some((Role::System, text.as_str())),
            MessageTemplate::Human(text) => Some((Role::Human, text.as_str())),
            MessageTemplate::Ai(text) => Some((Role::Ai, text.as_str())),
            MessageTemplate::Placeholder(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatPromptTemplate {
    pub messages: Vec<MessageTemplate>,
}

impl ChatPromptTemplate {
    pub fn from_messages(messages: Vec<MessageTemplate>) -> Self {
        Self { messages }
    }

    /// Variables referenced by the text messages, in first-use order.
    pub fn input_variables(&self) -> Vec<String> {
        let mut names = Vec::new();
        for (_, text) in self.messages.iter().filter_map(MessageTemplate::role_and_text) {
            for name in extract_variables(text) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Names of the history placeholders.
    pub fn placeholders(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                MessageTemplate::Placeholder(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Render a template without history placeholders.
    pub fn format_messages(&self, variables: &PromptVars) -> AppResult<Vec<ChatMessage>> {
        self.format_with_history(variables, &[])
    }

    /// Render every message, expanding each placeholder with the named history.
    ///
    /// A placeholder with no matching entry in `histories` is an error.
    pub fn format_with_history(
        &self,
        variables: &PromptVars,
        histories: &[(&str, &[ChatMessage])],
    ) -> AppResult<Vec<ChatMessage>> {
        check_variables(&self.input_variables(), variables)?;

        let mut rendered = Vec::with_capacity(self.messages.len());
        for message in &self.messages {
            match message {
                MessageTemplate::Placeholder(name) => {
                    let history = histories
                        .iter()
                        .find(|(key, _)| *key == name.as_str())
                        .map(|(_, messages)| *messages)
                        .ok_or_else(|| {
                            AppError::Prompt(format!("Missing message history for placeholder '{}'", name))
                        })?;
                    rendered.extend_from_slice(history);
                }
                other => {
                    if let Some((role, text)) = other.role_and_text() {
                        rendered.push(ChatMessage::new(role, render_template(text, variables)?));
                    }
                }
            }
        }

        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::vars;

    fn memory_template() -> ChatPromptTemplate {
        ChatPromptTemplate::from_messages(vec![
            MessageTemplate::System("You are a helpful network engineering assistant. Be concise.".into()),
            MessageTemplate::Placeholder("history".into()),
            MessageTemplate::Human("{{question}}".into()),
        ])
    }

    #[test]
    fn test_placeholder_expands_history_in_order() {
        let history = vec![
            ChatMessage::human("What is OSPF?"),
            ChatMessage::ai("A link-state routing protocol."),
        ];

        let messages = memory_template()
            .format_with_history(
                &vars([("question", "What are its main area types?")]),
                &[("history", history.as_slice())],
            )
            .unwrap();

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1], history[0]);
        assert_eq!(messages[2], history[1]);
        assert_eq!(messages[3], ChatMessage::human("What are its main area types?"));
    }

    #[test]
    fn test_missing_history_is_error() {
        let result = memory_template().format_messages(&vars([("question", "hi")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_input_variables_and_placeholders() {
        let template = memory_template();
        assert_eq!(template.input_variables(), vec!["question"]);
        assert_eq!(template.placeholders(), vec!["history"]);
    }
}
