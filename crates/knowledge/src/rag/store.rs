//! Vector store and retriever over a built index.

use crate::config;
use crate::embeddings::EmbeddingProvider;
use crate::index::SqliteIndex;
use crate::types::{KnowledgeChunk, ScoredChunk};
use crate::vector_index::VectorIndex;
use netassist_core::{AppError, AppResult};
use std::path::Path;
use std::sync::Arc;

/// An index paired with the embedding provider that built it.
#[derive(Debug)]
pub struct VectorStore {
    index: SqliteIndex,
    embedder: Arc<dyn EmbeddingProvider>,
}

impl VectorStore {
    pub fn new(index: SqliteIndex, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { index, embedder }
    }

    /// Open the index in `index_dir` for querying with `embedder`.
    ///
    /// Fails when the index is missing or was built with vectors of a
    /// different size than `embedder` produces.
    pub fn open(index_dir: &Path, embedder: Arc<dyn EmbeddingProvider>) -> AppResult<Self> {
        let index = crate::open_index(index_dir)?;

        if let Some(manifest) = config::load_manifest(index_dir)? {
            if manifest.dimensions != embedder.dimensions() {
                return Err(AppError::Knowledge(format!(
                    "Index was built with {}/{} ({} dimensions) but {}/{} produces {}. Run `netassist knowledge build` again.",
                    manifest.provider,
                    manifest.model,
                    manifest.dimensions,
                    embedder.provider_name(),
                    embedder.model_name(),
                    embedder.dimensions()
                )));
            }
            if manifest.model != embedder.model_name() {
                tracing::warn!(
                    "Index was built with model '{}', querying with '{}'",
                    manifest.model,
                    embedder.model_name()
                );
            }
        }

        Ok(Self::new(index, embedder))
    }

    pub fn index(&self) -> &SqliteIndex {
        &self.index
    }

    /// The `k` chunks most similar to `query`, best first.
    pub async fn similarity_search(&self, query: &str, k: usize) -> AppResult<Vec<ScoredChunk>> {
        let query_embedding = self.embedder.embed(query).await?;
        let results = self.index.search(&query_embedding, k)?;

        if let Some(top) = results.first() {
            tracing::debug!(
                "Similarity search returned {} chunks (top score: {:.3})",
                results.len(),
                top.score
            );
        }

        Ok(results)
    }
}

/// Fixed-k retrieval over a shared [`VectorStore`].
#[derive(Debug, Clone)]
pub struct Retriever {
    store: Arc<VectorStore>,
    k: usize,
}

impl Retriever {
    pub fn new(store: Arc<VectorStore>, k: usize) -> Self {
        Self { store, k }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn store(&self) -> &Arc<VectorStore> {
        &self.store
    }

    pub async fn retrieve(&self, query: &str) -> AppResult<Vec<ScoredChunk>> {
        self.store.similarity_search(query, self.k).await
    }
}

/// Join chunk texts with blank lines, in order.
pub fn format_docs<'a, I>(chunks: I) -> String
where
    I: IntoIterator<Item = &'a KnowledgeChunk>,
{
    chunks
        .into_iter()
        .map(|chunk| chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::providers::TrigramProvider;

    fn chunk(text: &str) -> KnowledgeChunk {
        KnowledgeChunk {
            id: uuid::Uuid::new_v4().to_string(),
            source: "runbook.md".to_string(),
            position: 0,
            text: text.to_string(),
            start: 0,
            end: text.len(),
            embedding: None,
        }
    }

    #[test]
    fn test_format_docs_joins_with_blank_lines() {
        let chunks = vec![chunk("first"), chunk("second")];
        assert_eq!(format_docs(&chunks), "first\n\nsecond");
        assert_eq!(format_docs(&Vec::<KnowledgeChunk>::new()), "");
    }

    #[tokio::test]
    async fn test_retriever_uses_fixed_k() {
        let temp = tempfile::TempDir::new().unwrap();
        let embedder: Arc<dyn EmbeddingProvider> = Arc::new(TrigramProvider::new(128));
        let mut index = SqliteIndex::open(&temp.path().join("index.sqlite")).unwrap();

        for text in ["OSPF EXSTART MTU", "CRC errors cabling", "BGP network statement"] {
            let mut c = chunk(text);
            c.embedding = Some(embedder.embed(text).await.unwrap());
            index.upsert_chunk(&c).unwrap();
        }

        let retriever = Retriever::new(Arc::new(VectorStore::new(index, embedder)), 2);
        let results = retriever.retrieve("BGP network not advertised").await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk.text, "BGP network statement");
    }
}
