//! Documentation search as a text tool.

use crate::rag::store::{format_docs, VectorStore};

/// Text returned when retrieval finds nothing.
pub const NO_DOCUMENTATION_FOUND: &str = "No relevant documentation found.";

/// Search the documentation and return the matching passages as text.
///
/// Never fails: an empty result and a retrieval error are both rendered as
/// text so a model can read them.
pub async fn search_documentation(store: &VectorStore, query: &str, k: usize) -> String {
    match store.similarity_search(query, k).await {
        Ok(results) if results.is_empty() => NO_DOCUMENTATION_FOUND.to_string(),
        Ok(results) => format_docs(results.iter().map(|r| &r.chunk)),
        Err(e) => {
            tracing::warn!("Documentation search failed: {}", e);
            format!("Documentation search error: {}", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::providers::{OllamaProvider, TrigramProvider};
    use crate::embeddings::{EmbeddingConfig, EmbeddingProvider};
    use crate::index::SqliteIndex;
    use crate::types::KnowledgeChunk;
    use crate::vector_index::VectorIndex;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_empty_index_reports_nothing_found() {
        let temp = TempDir::new().unwrap();
        let index = SqliteIndex::open(&temp.path().join("index.sqlite")).unwrap();
        let store = VectorStore::new(index, Arc::new(TrigramProvider::new(64)));

        assert_eq!(
            search_documentation(&store, "OSPF", 2).await,
            NO_DOCUMENTATION_FOUND
        );
    }

    #[tokio::test]
    async fn test_results_are_joined() {
        let temp = TempDir::new().unwrap();
        let embedder = Arc::new(TrigramProvider::new(64));
        let mut index = SqliteIndex::open(&temp.path().join("index.sqlite")).unwrap();
        for (i, text) in ["OSPF EXSTART check MTU", "OSPF hello timers"].iter().enumerate() {
            index
                .upsert_chunk(&KnowledgeChunk {
                    id: format!("c{}", i),
                    source: "runbook.md".to_string(),
                    position: i as u32,
                    text: text.to_string(),
                    start: 0,
                    end: text.len(),
                    embedding: Some(embedder.embed(text).await.unwrap()),
                })
                .unwrap();
        }
        let store = VectorStore::new(index, embedder);

        let text = search_documentation(&store, "OSPF EXSTART", 2).await;
        assert!(text.starts_with("OSPF EXSTART check MTU\n\n"));
        assert!(text.contains("OSPF hello timers"));
    }

    #[tokio::test]
    async fn test_embedding_failure_is_rendered_as_text() {
        let temp = TempDir::new().unwrap();
        let index = SqliteIndex::open(&temp.path().join("index.sqlite")).unwrap();
        let unreachable = OllamaProvider::new(&EmbeddingConfig {
            endpoint: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
            ..Default::default()
        })
        .unwrap();
        let store = VectorStore::new(index, Arc::new(unreachable));

        let text = search_documentation(&store, "OSPF", 2).await;
        assert!(text.starts_with("Documentation search error: "));
    }
}
