//! NetAssist Core Library
//!
//! This crate provides the foundational utilities shared by every NetAssist crate:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management
//! - The chat message model

pub mod config;
pub mod error;
pub mod logging;
pub mod message;

// Re-export commonly used types
pub use config::{AppConfig, KnowledgeSettings};
pub use error::{AppError, AppResult};
pub use message::{ChatMessage, Role};
