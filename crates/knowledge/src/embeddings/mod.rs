//! Embedding generation for the knowledge index.
//!
//! Providers are chosen by `knowledge.embeddingProvider`: `ollama` calls the
//! local model server, `trigram` hashes word trigrams and works offline.

pub mod config;
pub mod provider;
pub mod providers;

pub use config::EmbeddingConfig;
pub use provider::{create_provider, EmbeddingProvider};
