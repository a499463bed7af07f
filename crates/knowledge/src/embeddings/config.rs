//! Embedding configuration.

use netassist_core::{AppConfig, KnowledgeSettings};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Embedding configuration resolved from the application config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingConfig {
    /// Provider name: "ollama" or "trigram"
    pub provider: String,

    /// Model identifier (provider-specific)
    pub model: String,

    /// Embedding vector dimensions
    pub dimensions: usize,

    /// Base URL of the Ollama server
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self::from_settings(&KnowledgeSettings::default(), "http://localhost:11434")
    }
}

impl EmbeddingConfig {
    /// Build from knowledge settings and the Ollama endpoint.
    pub fn from_settings(settings: &KnowledgeSettings, endpoint: &str) -> Self {
        Self {
            provider: settings.embedding_provider.clone(),
            model: settings.embedding_model.clone(),
            dimensions: settings.dimensions,
            endpoint: endpoint.to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.timeout_secs,
            ..Self::from_settings(&config.knowledge, &config.endpoint)
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
