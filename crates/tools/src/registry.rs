//! Tool trait and registry.
//!
//! Tools take a single textual argument as produced by the model's routing
//! reply. The registry strips quotes, coerces integer parameters and
//! dispatches by name or alias.

use async_trait::async_trait;
use netassist_core::{AppError, AppResult};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Type of a tool's single parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Text,
    Integer,
}

/// A tool argument after coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolInput {
    Text(String),
    Integer(i64),
}

impl ToolInput {
    /// The argument as text, whatever its kind.
    pub fn as_text(&self) -> String {
        match self {
            ToolInput::Text(text) => text.clone(),
            ToolInput::Integer(n) => n.to_string(),
        }
    }
}

impl fmt::Display for ToolInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolInput::Text(text) => f.write_str(text),
            ToolInput::Integer(n) => write!(f, "{}", n),
        }
    }
}

/// A callable tool.
///
/// Failures the model should read (unknown device, bad subnet) are part of
/// the returned text. `Err` is reserved for inputs the tool cannot accept.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    /// One-line description shown to the model.
    fn description(&self) -> &str;

    fn parameter(&self) -> ParamKind {
        ParamKind::Text
    }

    async fn invoke(&self, input: ToolInput) -> AppResult<String>;
}

#[derive(Clone, Copy)]
enum ToolFn {
    Text(fn(&str) -> String),
    Integer(fn(i64) -> String),
}

/// Tool backed by a plain function.
pub struct FnTool {
    name: &'static str,
    description: &'static str,
    func: ToolFn,
}

impl FnTool {
    pub fn text(name: &'static str, description: &'static str, func: fn(&str) -> String) -> Self {
        Self {
            name,
            description,
            func: ToolFn::Text(func),
        }
    }

    pub fn integer(name: &'static str, description: &'static str, func: fn(i64) -> String) -> Self {
        Self {
            name,
            description,
            func: ToolFn::Integer(func),
        }
    }
}

#[async_trait]
impl Tool for FnTool {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn parameter(&self) -> ParamKind {
        match self.func {
            ToolFn::Text(_) => ParamKind::Text,
            ToolFn::Integer(_) => ParamKind::Integer,
        }
    }

    async fn invoke(&self, input: ToolInput) -> AppResult<String> {
        match (self.func, input) {
            (ToolFn::Text(func), input) => Ok(func(&input.as_text())),
            (ToolFn::Integer(func), ToolInput::Integer(n)) => Ok(func(n)),
            (ToolFn::Integer(func), ToolInput::Text(text)) => {
                let n = parse_integer(self.name, &text)?;
                Ok(func(n))
            }
        }
    }
}

fn parse_integer(tool: &str, text: &str) -> AppResult<i64> {
    text.trim().parse::<i64>().map_err(|e| {
        AppError::Tool(format!("invalid integer '{}' for {}: {}", text, tool, e))
    })
}

/// Strip surrounding whitespace and quotes from a raw model-supplied argument.
pub fn clean_input(raw: &str) -> &str {
    raw.trim().trim_matches('"').trim_matches('\'')
}

/// Tools by name, in registration order, plus aliases.
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    aliases: BTreeMap<String, String>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name.
    pub fn register(&mut self, tool: impl Tool + 'static) {
        let tool: Arc<dyn Tool> = Arc::new(tool);
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(i) => self.tools[i] = tool,
            None => self.tools.push(tool),
        }
    }

    /// Make `alias` resolve to the tool registered as `target`.
    pub fn alias(&mut self, alias: impl Into<String>, target: impl Into<String>) {
        self.aliases.insert(alias.into(), target.into());
    }

    /// Look up a tool by name or alias.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        let name = self.aliases.get(name).map(String::as_str).unwrap_or(name);
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered tool names, aliases excluded.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Numbered `N. name - description` list for routing prompts.
    pub fn describe(&self) -> String {
        self.tools
            .iter()
            .enumerate()
            .map(|(i, t)| format!("{}. {} - {}", i + 1, t.name(), t.description()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Invoke a tool with a raw argument.
    ///
    /// Quotes are stripped and integer parameters parsed. An unknown name or
    /// an argument that does not coerce is an `AppError::Tool`.
    pub async fn invoke(&self, name: &str, raw: &str) -> AppResult<String> {
        let tool = self
            .get(name)
            .ok_or_else(|| AppError::Tool(format!("Unknown tool: {}", name)))?;

        let cleaned = clean_input(raw);
        let input = match tool.parameter() {
            ParamKind::Text => ToolInput::Text(cleaned.to_string()),
            ParamKind::Integer => ToolInput::Integer(parse_integer(tool.name(), cleaned)?),
        };

        tracing::debug!(tool = tool.name(), input = %input, "Invoking tool");
        tool.invoke(input).await
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .field("aliases", &self.aliases)
            .finish()
    }
}
