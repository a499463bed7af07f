//! LLM integration crate for NetAssist.
//!
//! This crate provides a provider-agnostic abstraction for talking to a
//! language model through a unified trait-based interface.
//!
//! # Providers
//! - **Ollama**: Local LLM runtime (default)
//! - **Scripted**: Deterministic in-process client for tests and dry runs
//!
//! # Example
//! ```no_run
//! use netassist_llm::{LlmClient, LlmRequest, providers::OllamaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new();
//! let request = LlmRequest::new("Explain what BGP is in two sentences.", "llama3.2");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{
    ChatRequest, LlmClient, LlmRequest, LlmResponse, LlmStream, LlmStreamChunk, LlmUsage,
};
pub use factory::create_client;
pub use providers::{OllamaClient, RecordedRequest, ScriptedClient};
pub use types::ProviderType;
