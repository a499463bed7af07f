//! RAG response types.

use crate::types::ScoredChunk;
use serde::{Deserialize, Serialize};

/// Maximum snippet length for source references, in characters.
const MAX_SNIPPET_LENGTH: usize = 150;

/// A single source passage used to answer a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RagSourceRef {
    /// Source document path (e.g., "network-troubleshooting.md")
    pub source: String,

    /// Byte range within the source, e.g. "bytes 120-583"
    pub location: String,

    /// Start of the passage, truncated
    pub snippet: String,

    /// Cosine similarity to the question
    pub score: f32,
}

impl RagSourceRef {
    pub fn from_scored(scored: &ScoredChunk) -> Self {
        let chunk = &scored.chunk;
        Self {
            source: chunk.source.clone(),
            location: format!("bytes {}-{}", chunk.start, chunk.end),
            snippet: snippet(&chunk.text),
            score: scored.score,
        }
    }
}

/// Answer produced by the RAG chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagAnswer {
    /// Model answer
    pub answer: String,

    /// Passages the answer was grounded on, best first
    pub sources: Vec<RagSourceRef>,
}

fn snippet(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX_SNIPPET_LENGTH {
        return flat;
    }
    let truncated: String = flat.chars().take(MAX_SNIPPET_LENGTH).collect();
    format!("{}...", truncated.trim_end())
}
