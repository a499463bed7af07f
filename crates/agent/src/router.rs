//! Parsers for the line-oriented routing replies the model is asked to give.

use serde::Serialize;

/// Reply to the `agent.router` prompt: `TOOL:`, `INPUT:` and `ANSWER:` lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToolSelection {
    /// Lower-cased tool name; `None` when no `TOOL:` line was given.
    pub tool: Option<String>,
    /// Input with surrounding quotes removed.
    pub input: Option<String>,
    pub answer: Option<String>,
}

impl ToolSelection {
    /// The selected tool, unless the model chose `none` or named no tool.
    pub fn tool_name(&self) -> Option<&str> {
        self.tool.as_deref().filter(|name| *name != "none")
    }
}

fn field<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.strip_prefix(key).map(str::trim)
}

fn strip_quotes(value: &str) -> String {
    value.trim_matches('"').trim_matches('\'').to_string()
}

/// Parse a tool selection. Later lines override earlier ones.
pub fn parse_tool_selection(response: &str) -> ToolSelection {
    let mut selection = ToolSelection::default();

    for line in response.trim().lines() {
        if let Some(value) = field(line, "TOOL:") {
            selection.tool = Some(value.to_lowercase());
        } else if let Some(value) = field(line, "INPUT:") {
            selection.input = Some(strip_quotes(value));
        } else if let Some(value) = field(line, "ANSWER:") {
            selection.answer = Some(value.to_string());
        }
    }

    selection
}

/// Action chosen by the chatbot router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RouterDecision {
    Tool { name: String, input: String },
    Docs { query: Option<String> },
    Direct { answer: Option<String> },
    /// No `ACTION:` line, or one naming no known action. The raw action is kept.
    Unrecognised { raw: Option<String> },
}

/// Parse an `ACTION:` reply.
///
/// Only an explicit `ACTION: DIRECT` is a direct answer; an `ANSWER:` line
/// under any other action is ignored. Missing tool fields become empty strings.
pub fn parse_router_decision(response: &str) -> RouterDecision {
    let mut action = None;
    let mut tool_name = None;
    let mut tool_input = None;
    let mut query = None;
    let mut answer = None;

    for line in response.trim().lines() {
        let line = line.trim();
        if let Some(value) = field(line, "ACTION:") {
            action = Some(value.to_uppercase());
        } else if let Some(value) = field(line, "TOOL_NAME:") {
            tool_name = Some(value.to_lowercase());
        } else if let Some(value) = field(line, "TOOL_INPUT:") {
            tool_input = Some(strip_quotes(value));
        } else if let Some(value) = field(line, "QUERY:") {
            query = Some(value.to_string());
        } else if let Some(value) = field(line, "ANSWER:") {
            answer = Some(value.to_string());
        }
    }

    match action.as_deref() {
        Some("TOOL") => RouterDecision::Tool {
            name: tool_name.unwrap_or_default(),
            input: tool_input.unwrap_or_default(),
        },
        Some("DOCS") => RouterDecision::Docs { query },
        Some("DIRECT") => RouterDecision::Direct {
            answer: answer.filter(|a| !a.is_empty()),
        },
        _ => RouterDecision::Unrecognised { raw: action },
    }
}
