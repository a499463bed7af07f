//! Retrieval-augmented generation over the knowledge index.

pub mod ask;
pub mod search;
pub mod store;
pub mod types;

pub use ask::RagChain;
pub use search::{search_documentation, NO_DOCUMENTATION_FOUND};
pub use store::{format_docs, Retriever, VectorStore};
pub use types::{RagAnswer, RagSourceRef};
