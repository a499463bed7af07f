//! RAG answering orchestration.
//!
//! Retrieves relevant chunks and generates a natural language answer via LLM.

use crate::rag::store::{format_docs, Retriever};
use crate::rag::types::{RagAnswer, RagSourceRef};
use netassist_core::AppResult;
use netassist_llm::{ChatRequest, LlmClient};
use netassist_prompt::{vars, ChatPromptTemplate, PromptDefinition};
use std::sync::Arc;

/// Retriever, prompt and model wired into a question-answering chain.
pub struct RagChain {
    retriever: Retriever,
    llm: Arc<dyn LlmClient>,
    model: String,
    prompt: ChatPromptTemplate,
}

impl RagChain {
    /// `prompt` must take `context` and `question`.
    pub fn new(
        retriever: Retriever,
        llm: Arc<dyn LlmClient>,
        model: impl Into<String>,
        prompt: ChatPromptTemplate,
    ) -> Self {
        Self {
            retriever,
            llm,
            model: model.into(),
            prompt,
        }
    }

    pub fn from_definition(
        retriever: Retriever,
        llm: Arc<dyn LlmClient>,
        model: impl Into<String>,
        definition: &PromptDefinition,
    ) -> Self {
        Self::new(retriever, llm, model, definition.chat_template())
    }

    /// Answer `question` from the retrieved passages.
    ///
    /// An empty retrieval still calls the model, with an empty context.
    pub async fn ask(&self, question: &str) -> AppResult<RagAnswer> {
        let results = self.retriever.retrieve(question).await?;

        tracing::info!(
            "Retrieved {} chunks for question (k={})",
            results.len(),
            self.retriever.k()
        );

        let context = format_docs(results.iter().map(|r| &r.chunk));
        let messages = self
            .prompt
            .format_messages(&vars([("context", context.as_str()), ("question", question)]))?;

        let response = self
            .llm
            .chat(&ChatRequest::new(self.model.as_str(), messages))
            .await?;

        Ok(RagAnswer {
            answer: response.content,
            sources: results.iter().map(RagSourceRef::from_scored).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embeddings::providers::TrigramProvider;
    use crate::embeddings::EmbeddingProvider;
    use crate::index::SqliteIndex;
    use crate::rag::store::VectorStore;
    use crate::types::KnowledgeChunk;
    use crate::vector_index::VectorIndex;
    use netassist_core::Role;
    use netassist_llm::ScriptedClient;
    use netassist_prompt::builtin_prompt;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_ask_renders_context_and_returns_sources() {
        let temp = TempDir::new().unwrap();
        let embedder = Arc::new(TrigramProvider::new(128));
        let mut index = SqliteIndex::open(&temp.path().join("index.sqlite")).unwrap();
        let text = "## OSPF stuck in EXSTART\n\nCheck for an MTU mismatch on both interfaces.";
        index
            .upsert_chunk(&KnowledgeChunk {
                id: "c1".to_string(),
                source: "runbook.md".to_string(),
                position: 0,
                text: text.to_string(),
                start: 0,
                end: text.len(),
                embedding: Some(embedder.embed(text).await.unwrap()),
            })
            .unwrap();

        let retriever = Retriever::new(Arc::new(VectorStore::new(index, embedder)), 3);
        let client = Arc::new(ScriptedClient::new(["Fix the MTU mismatch."]));
        let definition = builtin_prompt("rag.answer").unwrap().unwrap();
        let chain = RagChain::from_definition(retriever, client.clone(), "llama3.2", &definition);

        let answer = chain.ask("Why is OSPF stuck in EXSTART?").await.unwrap();
        assert_eq!(answer.answer, "Fix the MTU mismatch.");
        assert_eq!(answer.sources.len(), 1);
        assert_eq!(answer.sources[0].source, "runbook.md");

        let requests = client.requests();
        let messages = requests[0].messages();
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(
            messages[1].content,
            format!(
                "Context from documentation:\n{}\n\nQuestion: Why is OSPF stuck in EXSTART?\nAnswer:",
                text
            )
        );
    }
}
