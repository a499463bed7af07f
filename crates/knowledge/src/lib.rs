//! Knowledge index for NetAssist.
//!
//! Loads the runbook documents, splits them into markdown-aware chunks,
//! embeds them and stores the vectors in SQLite. Query paths open the built
//! index and retrieve the closest passages for documentation search and the
//! RAG chain.

pub mod chunker;
pub mod config;
pub mod embeddings;
pub mod index;
pub mod loader;
pub mod rag;
pub mod types;
pub mod vector_index;

// Re-export commonly used types
pub use chunker::split_documents;
pub use embeddings::{create_provider, EmbeddingConfig, EmbeddingProvider};
pub use index::SqliteIndex;
pub use loader::load_documents;
pub use rag::{
    format_docs, search_documentation, RagAnswer, RagChain, RagSourceRef, Retriever, VectorStore,
};
pub use types::{
    BuildOptions, BuildStats, Document, IndexManifest, IndexStats, KnowledgeChunk, ScoredChunk,
};
pub use vector_index::VectorIndex;

use chrono::Utc;
use netassist_core::{AppConfig, AppError, AppResult};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Build the index from the docs directory, replacing any previous contents.
pub async fn build_index(
    options: &BuildOptions,
    embedder: &dyn EmbeddingProvider,
) -> AppResult<BuildStats> {
    let start = Instant::now();

    tracing::info!(
        "Building knowledge index from {:?} with {}/{}",
        options.docs_dir,
        embedder.provider_name(),
        embedder.model_name()
    );

    let docs = load_documents(&options.docs_dir, &options.extension)?;
    if docs.is_empty() {
        return Err(AppError::Knowledge(format!(
            "No *.{} documents found in {}",
            options.extension.trim_start_matches('.'),
            options.docs_dir.display()
        )));
    }

    let mut chunks = split_documents(&docs, options.chunk_size, options.chunk_overlap)?;

    // Embed everything before touching the index so a failure keeps the old snapshot.
    let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
    let embeddings = embedder.embed_batch(&texts).await?;
    if embeddings.len() != chunks.len() {
        return Err(AppError::Knowledge(format!(
            "Embedding provider returned {} vectors for {} chunks",
            embeddings.len(),
            chunks.len()
        )));
    }
    for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
        chunk.embedding = Some(embedding);
    }

    let mut index = SqliteIndex::open(&config::get_index_path(&options.index_dir))?;
    index.replace_all(&docs, &chunks)?;

    let bytes_processed: u64 = docs.iter().map(|d| d.content.len() as u64).sum();
    let stats = BuildStats {
        sources_count: docs.len() as u32,
        chunks_count: chunks.len() as u32,
        bytes_processed,
        duration_secs: start.elapsed().as_secs_f64(),
        sample_chunks: chunks.iter().take(3).map(|c| c.text.clone()).collect(),
    };

    config::save_manifest(
        &options.index_dir,
        &IndexManifest {
            provider: embedder.provider_name().to_string(),
            model: embedder.model_name().to_string(),
            dimensions: embedder.dimensions(),
            built_at: Utc::now(),
            sources_count: stats.sources_count,
            chunks_count: stats.chunks_count,
        },
    )?;

    tracing::info!(
        "Build completed: {} sources, {} chunks, {} bytes in {:.2}s",
        stats.sources_count,
        stats.chunks_count,
        stats.bytes_processed,
        stats.duration_secs
    );

    Ok(stats)
}

/// Open an existing index for querying.
pub fn open_index(index_dir: &Path) -> AppResult<SqliteIndex> {
    let db_path = config::get_index_path(index_dir);
    if !index_dir.is_dir() || !db_path.is_file() {
        return Err(AppError::Knowledge(format!(
            "No knowledge index at {}. Run `netassist knowledge build` first.",
            index_dir.display()
        )));
    }

    SqliteIndex::open(&db_path)
}

/// Whether `docs` differ from the snapshot the index was built from.
///
/// Added, removed and modified documents all count.
pub fn is_stale(index: &SqliteIndex, docs: &[Document]) -> AppResult<bool> {
    let stored = index.source_hashes()?;
    if stored.len() != docs.len() {
        return Ok(true);
    }

    Ok(docs
        .iter()
        .any(|doc| stored.get(&doc.source) != Some(&doc.content_hash())))
}

/// Log a warning when the index no longer matches the docs directory.
///
/// Problems reading the documents are logged and otherwise ignored.
pub fn warn_if_stale(index: &SqliteIndex, docs_dir: &Path, extension: &str) {
    let stale = load_documents(docs_dir, extension).and_then(|docs| is_stale(index, &docs));
    match stale {
        Ok(true) => tracing::warn!(
            "Knowledge index is out of date with {}. Run `netassist knowledge build` to refresh it.",
            docs_dir.display()
        ),
        Ok(false) => tracing::debug!("Knowledge index is up to date"),
        Err(e) => tracing::debug!("Could not check index freshness: {}", e),
    }
}

/// Open the configured index as a vector store, warning when it is stale.
pub fn open_store(config: &AppConfig) -> AppResult<VectorStore> {
    let embedder = create_provider(&EmbeddingConfig::from_app_config(config))?;
    let store = VectorStore::open(&config.index_dir(), embedder)?;
    warn_if_stale(store.index(), &config.docs_dir(), &config.knowledge.extension);
    Ok(store)
}

/// Retriever over the configured index with the RAG chain's `k`.
pub fn open_retriever(config: &AppConfig) -> AppResult<Retriever> {
    Ok(Retriever::new(
        Arc::new(open_store(config)?),
        config.knowledge.rag_k,
    ))
}

/// Remove the index directory. Returns whether there was anything to remove.
pub fn clean(index_dir: &Path) -> AppResult<bool> {
    if !index_dir.exists() {
        return Ok(false);
    }

    std::fs::remove_dir_all(index_dir).map_err(|e| {
        AppError::Knowledge(format!(
            "Failed to remove index at {}: {}",
            index_dir.display(),
            e
        ))
    })?;

    tracing::info!("Removed knowledge index at {}", index_dir.display());
    Ok(true)
}

/// Get statistics for the index.
pub fn stats(index_dir: &Path) -> AppResult<IndexStats> {
    let index = open_index(index_dir)?;
    let (sources_count, chunks_count) = index.counts()?;
    let db_size_bytes = std::fs::metadata(index.path()).map(|m| m.len()).unwrap_or(0);

    Ok(IndexStats {
        index_dir: index_dir.to_path_buf(),
        sources_count,
        chunks_count,
        db_size_bytes,
        manifest: config::load_manifest(index_dir)?,
    })
}
