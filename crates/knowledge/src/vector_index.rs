//! Storage seam for the runbook index.
//!
//! An index holds one snapshot: the documents it was built from (by content
//! hash) and their embedded chunks.

use crate::types::{Document, KnowledgeChunk, ScoredChunk};
use netassist_core::AppResult;
use std::collections::BTreeMap;

pub trait VectorIndex: Send + Sync {
    /// Record a source document and its content hash.
    fn record_source(&mut self, doc: &Document) -> AppResult<()>;

    /// Content hashes of the recorded documents, keyed by source path.
    fn source_hashes(&self) -> AppResult<BTreeMap<String, String>>;

    /// Insert or replace an embedded chunk. Chunks without an embedding are rejected.
    fn upsert_chunk(&mut self, chunk: &KnowledgeChunk) -> AppResult<()>;

    /// The `top_k` chunks closest to `query_embedding`, best first.
    fn search(&self, query_embedding: &[f32], top_k: usize) -> AppResult<Vec<ScoredChunk>>;

    /// `(sources, chunks)` currently stored.
    fn counts(&self) -> AppResult<(u32, u32)>;

    /// Drop the whole snapshot.
    fn clear(&mut self) -> AppResult<()>;

    /// Swap in a new snapshot atomically. On error the previous one is kept.
    fn replace_all(&mut self, docs: &[Document], chunks: &[KnowledgeChunk]) -> AppResult<()>;
}
