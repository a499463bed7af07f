//! Prompt definition types.
//!
//! A prompt definition is the YAML form of a template: an optional system
//! message, an optional history placeholder and a human template, or for
//! few-shot prompts a prefix, examples and an example template.

use crate::chat::{ChatPromptTemplate, MessageTemplate};
use crate::few_shot::FewShotPromptTemplate;
use crate::template::{extract_variables, PromptTemplate, PromptVars};
use netassist_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A prompt definition loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptDefinition {
    /// Unique prompt identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    #[serde(default)]
    pub description: String,

    /// System message template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Human message template (the suffix for few-shot prompts)
    pub template: String,

    /// Declared input variables; inferred from placeholders when empty
    #[serde(rename = "inputVariables", default)]
    pub input_variables: Vec<String>,

    /// Name of the message-history placeholder inserted before the human message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<String>,

    /// Few-shot prefix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Few-shot examples
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<BTreeMap<String, String>>,

    /// Template each few-shot example is rendered through
    #[serde(rename = "exampleTemplate", default, skip_serializing_if = "Option::is_none")]
    pub example_template: Option<String>,
}

/// Where a resolved prompt came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptSource {
    Builtin,
    Workspace,
}

impl std::fmt::Display for PromptSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptSource::Builtin => f.write_str("builtin"),
            PromptSource::Workspace => f.write_str("workspace"),
        }
    }
}

impl PromptDefinition {
    /// Variables the prompt needs, declared or inferred.
    pub fn variables(&self) -> Vec<String> {
        if !self.input_variables.is_empty() {
            return self.input_variables.clone();
        }

        let mut names = Vec::new();
        for text in [self.prefix.as_deref(), self.system.as_deref(), Some(self.template.as_str())]
            .into_iter()
            .flatten()
        {
            for name in extract_variables(text) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    pub fn is_few_shot(&self) -> bool {
        self.example_template.is_some() && !self.examples.is_empty()
    }

    /// The human template alone.
    pub fn prompt_template(&self) -> PromptTemplate {
        let mut template = PromptTemplate::from_template(self.template.clone());
        if !self.input_variables.is_empty() {
            template
                .input_variables
                .retain(|name| self.input_variables.contains(name));
        }
        template
    }

    /// System message, history placeholder and human message.
    pub fn chat_template(&self) -> ChatPromptTemplate {
        let mut messages = Vec::with_capacity(3);
        if let Some(system) = &self.system {
            messages.push(MessageTemplate::System(system.clone()));
        }
        if let Some(history) = &self.history {
            messages.push(MessageTemplate::Placeholder(history.clone()));
        }
        messages.push(MessageTemplate::Human(self.template.clone()));
        ChatPromptTemplate::from_messages(messages)
    }

    /// Few-shot template built from `prefix`, `examples` and `exampleTemplate`.
    pub fn few_shot_template(&self) -> AppResult<FewShotPromptTemplate> {
        let example_template = self.example_template.as_ref().ok_or_else(|| {
            AppError::Prompt(format!("Prompt '{}' has no exampleTemplate", self.id))
        })?;

        if self.examples.is_empty() {
            return Err(AppError::Prompt(format!("Prompt '{}' has no examples", self.id)));
        }

        let examples: Vec<PromptVars> = self
            .examples
            .iter()
            .map(|e| e.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .collect();

        Ok(FewShotPromptTemplate::new(
            examples,
            PromptTemplate::from_template(example_template.clone()),
            self.prefix.clone().unwrap_or_default(),
            self.template.clone(),
            self.variables(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::vars;

    #[test]
    fn test_prompt_definition_deserialization() {
        let yaml = r#"
id: test.prompt
title: Test Prompt
apiVersion: "1.0"
system: You are terse.
history: history
template: "{{question}}"
inputVariables: [question]
"#;

        let def: PromptDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.id, "test.prompt");
        assert_eq!(def.history.as_deref(), Some("history"));
        assert!(!def.is_few_shot());

        let chat = def.chat_template();
        assert_eq!(chat.placeholders(), vec!["history"]);
        assert_eq!(chat.input_variables(), vec!["question"]);
    }

    #[test]
    fn test_variables_are_inferred_when_undeclared() {
        let def: PromptDefinition = serde_yaml::from_str(
            "id: a.b\ntitle: T\napiVersion: \"1.0\"\nsystem: \"Tools: {{tools}}\"\ntemplate: \"{{question}}\"\n",
        )
        .unwrap();
        assert_eq!(def.variables(), vec!["tools", "question"]);
    }

    #[test]
    fn test_few_shot_from_definition() {
        let yaml = r#"
id: cmd.describe
title: Describe
apiVersion: "1.0"
prefix: "Examples:"
exampleTemplate: "{{command}} => {{description}}"
examples:
  - command: show vlan
    description: Lists VLANs.
template: "{{input}} =>"
inputVariables: [input]
"#;
        let def: PromptDefinition = serde_yaml::from_str(yaml).unwrap();
        assert!(def.is_few_shot());

        let rendered = def
            .few_shot_template()
            .unwrap()
            .format(&vars([("input", "show clock")]))
            .unwrap();
        assert_eq!(rendered, "Examples:\n\nshow vlan => Lists VLANs.\n\nshow clock =>");
    }
}
