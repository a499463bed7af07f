//! LLM provider implementations.

pub mod ollama;
pub mod scripted;

pub use ollama::{OllamaClient, DEFAULT_OLLAMA_URL};
pub use scripted::{RecordedRequest, ScriptedClient};
