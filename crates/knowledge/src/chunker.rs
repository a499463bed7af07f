//! Markdown-aware chunking with configurable size and overlap.
//!
//! Splitting prefers the largest semantic unit that fits: headings first,
//! then paragraphs, lines, sentences and words.

use crate::types::{Document, KnowledgeChunk};
use netassist_core::{AppError, AppResult};
use text_splitter::{ChunkConfig, MarkdownSplitter};

/// Split documents into chunks of at most `chunk_size` characters.
///
/// Neighbouring chunks share up to `overlap` characters. Every chunk records
/// its source and byte range within the source content.
pub fn split_documents(
    docs: &[Document],
    chunk_size: usize,
    overlap: usize,
) -> AppResult<Vec<KnowledgeChunk>> {
    if chunk_size == 0 {
        return Err(AppError::Knowledge(
            "Chunk size must be greater than 0".to_string(),
        ));
    }
    if overlap >= chunk_size {
        return Err(AppError::Knowledge(format!(
            "Chunk overlap ({}) must be smaller than chunk size ({})",
            overlap, chunk_size
        )));
    }

    let config = ChunkConfig::new(chunk_size)
        .with_overlap(overlap)
        .map_err(|e| AppError::Knowledge(format!("Invalid chunk configuration: {}", e)))?;
    let splitter = MarkdownSplitter::new(config);

    let mut chunks = Vec::new();
    for doc in docs {
        let before = chunks.len();
        for (position, (offset, text)) in splitter.chunk_indices(&doc.content).enumerate() {
            chunks.push(KnowledgeChunk {
                id: uuid::Uuid::new_v4().to_string(),
                source: doc.source.clone(),
                position: position as u32,
                text: text.to_string(),
                start: offset,
                end: offset + text.len(),
                embedding: None,
            });
        }
        tracing::debug!("Split {} into {} chunks", doc.source, chunks.len() - before);
    }

    Ok(chunks)
}
