//! Knowledge command handler.
//!
//! Builds and queries the runbook index used for documentation search and RAG.

use clap::{Args, Subcommand};
use netassist_agent::PromptResolver;
use netassist_core::{config::AppConfig, AppResult};
use netassist_knowledge::{
    build_index, create_provider, open_retriever, open_store, search_documentation, BuildOptions,
    EmbeddingConfig, RagChain,
};

use super::{llm_client, print_json, rule};

/// Query used to check retrieval right after a build.
const RETRIEVAL_CHECK_QUERY: &str = "OSPF stuck in EXSTART";

/// Knowledge index management (local RAG)
#[derive(Args, Debug)]
pub struct KnowledgeCommand {
    #[command(subcommand)]
    pub action: KnowledgeAction,
}

#[derive(Subcommand, Debug)]
pub enum KnowledgeAction {
    /// Build the index from the docs directory
    Build(KnowledgeBuildCommand),
    /// Show the passages closest to a query
    Search(KnowledgeSearchCommand),
    /// Answer a question from the documentation
    Ask(KnowledgeAskCommand),
    /// Show index statistics
    Stats(KnowledgeStatsCommand),
    /// Remove the index
    Clean(KnowledgeCleanCommand),
}

/// Build the index
#[derive(Args, Debug)]
pub struct KnowledgeBuildCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl KnowledgeBuildCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing knowledge build command");

        let options = BuildOptions::from_config(config);
        let embedder = create_provider(&EmbeddingConfig::from_app_config(config))?;
        let stats = build_index(&options, embedder.as_ref()).await?;

        if self.json {
            return print_json(&stats);
        }

        println!("Loaded {} document(s)", stats.sources_count);
        println!("Split into {} chunks", stats.chunks_count);
        for (i, chunk) in stats.sample_chunks.iter().enumerate() {
            println!("\n--- Chunk {} ---", i + 1);
            println!("{}...", preview(chunk, 200));
        }

        println!("\nVector store created at {}", options.index_dir.display());

        println!("\nTesting retrieval...");
        let store = open_store(config)?;
        let results = store.similarity_search(RETRIEVAL_CHECK_QUERY, 2).await?;
        println!("Query: '{}'", RETRIEVAL_CHECK_QUERY);
        println!("Found {} relevant chunks", results.len());
        for (i, result) in results.iter().enumerate() {
            println!("\n--- Result {} (score {:.3}) ---", i + 1, result.score);
            println!("{}...", preview(&result.chunk.text, 200));
        }

        Ok(())
    }
}

/// First `max` characters of `text`.
fn preview(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Search the documentation
#[derive(Args, Debug)]
pub struct KnowledgeSearchCommand {
    /// Query text
    pub query: String,

    /// Number of passages to return (default: search_k from config)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

impl KnowledgeSearchCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing knowledge search command");

        let store = open_store(config)?;
        let k = self.top_k.unwrap_or(config.knowledge.search_k);
        println!("{}", search_documentation(&store, &self.query, k).await);

        Ok(())
    }
}

const DEFAULT_QUESTIONS: [&str; 4] = [
    "How do I troubleshoot OSPF stuck in EXSTART state?",
    "What causes high CRC errors on an interface?",
    "Why might BGP not advertise a route?",
    "What should I check if users can't reach other VLANs?",
];

/// Answer questions with retrieval-augmented generation
#[derive(Args, Debug)]
pub struct KnowledgeAskCommand {
    /// Questions to answer; omit to run the built-in set
    pub questions: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl KnowledgeAskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing knowledge ask command");

        let definition = PromptResolver::workspace(&config.workspace).get("rag.answer")?;
        let chain = RagChain::from_definition(
            open_retriever(config)?,
            llm_client(config)?,
            config.model.as_str(),
            &definition,
        );

        let questions: Vec<&str> = if self.questions.is_empty() {
            DEFAULT_QUESTIONS.to_vec()
        } else {
            self.questions.iter().map(String::as_str).collect()
        };

        let mut answers = Vec::new();
        for question in questions {
            let response = chain.ask(question).await?;
            tracing::debug!("RAG response: sources_count={}", response.sources.len());

            if self.json {
                answers.push(serde_json::json!({ "question": question, "response": response }));
                continue;
            }

            println!("\nQ: {}", question);
            println!("{}", rule('-', 40));
            println!("A: {}", response.answer);
            if response.sources.is_empty() {
                println!("\nSources: (no sources available)");
            } else {
                println!("\nSources:");
                for source_ref in &response.sources {
                    println!(
                        "- {} ({}, score {:.3})",
                        source_ref.source, source_ref.location, source_ref.score
                    );
                }
            }
            println!("\n{}", rule('=', 50));
        }

        if self.json {
            print_json(&answers)?;
        }

        Ok(())
    }
}

/// Show index stats
#[derive(Args, Debug)]
pub struct KnowledgeStatsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl KnowledgeStatsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing knowledge stats command");

        let stats = netassist_knowledge::stats(&config.index_dir())?;

        if self.json {
            return print_json(&stats);
        }

        println!("Knowledge index: {}", stats.index_dir.display());
        println!("  Sources: {}", stats.sources_count);
        println!("  Chunks: {}", stats.chunks_count);
        println!("  DB size: {} bytes", stats.db_size_bytes);
        if let Some(manifest) = stats.manifest {
            println!(
                "  Embeddings: {}/{} ({} dimensions)",
                manifest.provider, manifest.model, manifest.dimensions
            );
            println!("  Built at: {}", manifest.built_at);
        }

        Ok(())
    }
}

/// Remove the index
#[derive(Args, Debug)]
pub struct KnowledgeCleanCommand {}

impl KnowledgeCleanCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing knowledge clean command");

        let index_dir = config.index_dir();
        if netassist_knowledge::clean(&index_dir)? {
            println!("Knowledge index at {} removed", index_dir.display());
        } else {
            println!("No knowledge index at {}", index_dir.display());
        }

        Ok(())
    }
}

impl KnowledgeCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        match &self.action {
            KnowledgeAction::Build(cmd) => cmd.execute(config).await,
            KnowledgeAction::Search(cmd) => cmd.execute(config).await,
            KnowledgeAction::Ask(cmd) => cmd.execute(config).await,
            KnowledgeAction::Stats(cmd) => cmd.execute(config).await,
            KnowledgeAction::Clean(cmd) => cmd.execute(config).await,
        }
    }
}
