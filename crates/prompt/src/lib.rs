//! Prompt system for NetAssist.
//!
//! This crate provides structured prompt management with:
//! - String templates rendered with Handlebars (`{{name}}` placeholders)
//! - Chat templates with role-tagged messages and history placeholders
//! - Few-shot templates
//! - YAML prompt definitions, built-in and per-workspace

pub mod builtin;
pub mod chat;
pub mod few_shot;
pub mod loader;
pub mod template;
pub mod types;

// Re-export main types
pub use builtin::{builtin_ids, builtin_prompt};
pub use chat::{ChatPromptTemplate, MessageTemplate};
pub use few_shot::FewShotPromptTemplate;
pub use loader::{available_prompts, list_prompts, load_prompt, resolve_prompt, validate_prompt};
pub use template::{extract_variables, render_template, vars, PromptTemplate, PromptVars};
pub use types::{PromptDefinition, PromptSource};
