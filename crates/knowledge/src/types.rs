//! Knowledge system type definitions.

use chrono::{DateTime, Utc};
use netassist_core::AppConfig;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// A source document loaded from the docs directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Path relative to the docs directory, `/`-separated
    pub source: String,

    /// Full text content
    pub content: String,
}

impl Document {
    pub fn new(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
        }
    }

    /// Hex SHA-256 of the content.
    pub fn content_hash(&self) -> String {
        format!("{:x}", Sha256::digest(self.content.as_bytes()))
    }
}

/// A text chunk with embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeChunk {
    /// Unique chunk identifier
    pub id: String,

    /// Source document path
    pub source: String,

    /// Position within source
    pub position: u32,

    /// Text content
    pub text: String,

    /// Byte offset of the chunk start within the source
    pub start: usize,

    /// Byte offset one past the chunk end
    pub end: usize,

    /// Embedding vector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

/// A retrieved chunk with its cosine similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: KnowledgeChunk,
    pub score: f32,
}

/// Record of the last build, stored next to the index database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexManifest {
    /// Embedding provider used for the build
    pub provider: String,

    /// Embedding model used for the build
    pub model: String,

    /// Vector dimensions
    pub dimensions: usize,

    pub built_at: DateTime<Utc>,

    pub sources_count: u32,

    pub chunks_count: u32,
}

/// Options for building the index.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Directory the documents are loaded from
    pub docs_dir: PathBuf,

    /// Extension of the files to load (without the dot)
    pub extension: String,

    /// Directory the index is written to
    pub index_dir: PathBuf,

    /// Maximum chunk size in characters
    pub chunk_size: usize,

    /// Overlap between chunks in characters
    pub chunk_overlap: usize,
}

impl BuildOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            docs_dir: config.docs_dir(),
            extension: config.knowledge.extension.clone(),
            index_dir: config.index_dir(),
            chunk_size: config.knowledge.chunk_size,
            chunk_overlap: config.knowledge.chunk_overlap,
        }
    }
}

/// Statistics from a build operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStats {
    /// Number of documents indexed
    pub sources_count: u32,

    /// Number of chunks created
    pub chunks_count: u32,

    /// Total bytes processed
    pub bytes_processed: u64,

    /// Duration in seconds
    pub duration_secs: f64,

    /// Text of the first few chunks, for display
    pub sample_chunks: Vec<String>,
}

/// Statistics for a built index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub index_dir: PathBuf,

    /// Number of sources
    pub sources_count: u32,

    /// Number of chunks
    pub chunks_count: u32,

    /// Database size in bytes
    pub db_size_bytes: u64,

    /// Manifest of the last build, if one was recorded
    pub manifest: Option<IndexManifest>,
}
