//! Command handlers for the NetAssist CLI.
//!
//! One submodule per command family, plus the client and assistant wiring
//! they share.

pub mod agent;
pub mod ask;
pub mod chains;
pub mod chat;
pub mod converse;
pub mod knowledge;
pub mod prompts;
pub mod tools;

// Re-export command types for convenience
pub use agent::AgentCommand;
pub use ask::AskCommand;
pub use chains::{DescribeCommand, ExplainCommand, QaCommand, StepsCommand, TroubleshootCommand};
pub use chat::ChatCommand;
pub use converse::ConverseCommand;
pub use knowledge::KnowledgeCommand;
pub use prompts::PromptsCommand;
pub use tools::ToolsCommand;

use netassist_agent::{Assistant, PromptResolver};
use netassist_core::{config::AppConfig, AppError, AppResult};
use netassist_llm::{create_client, LlmClient};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Model client for the configured provider and endpoint.
pub fn llm_client(config: &AppConfig) -> AppResult<Arc<dyn LlmClient>> {
    create_client(
        &config.provider,
        Some(config.endpoint.as_str()),
        Some(Duration::from_secs(config.timeout_secs)),
    )
}

/// Assistant on `model` with workspace prompt overrides.
pub fn assistant(config: &AppConfig, model: &str) -> AppResult<Assistant> {
    Ok(Assistant::new(
        llm_client(config)?,
        model,
        PromptResolver::workspace(&config.workspace),
    ))
}

/// Pretty-print a value as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Serialization(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

/// Horizontal rule used between demo sections.
pub fn rule(ch: char, width: usize) -> String {
    std::iter::repeat(ch).take(width).collect()
}
