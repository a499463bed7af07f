//! NetAssist CLI
//!
//! Main entry point for the network engineering assistant.
//! One subcommand per building block: prompts, chains, memory, tools,
//! the tool agent, documentation RAG and the interactive chatbot.

mod commands;

use clap::{Parser, Subcommand};
use commands::{
    AgentCommand, AskCommand, ChatCommand, ConverseCommand, DescribeCommand, ExplainCommand,
    KnowledgeCommand, PromptsCommand, QaCommand, StepsCommand, ToolsCommand, TroubleshootCommand,
};
use netassist_core::config::AppConfig;
use netassist_core::{logging, AppResult};
use std::path::PathBuf;

/// NetAssist - network engineering assistant on a local Ollama model
#[derive(Parser, Debug)]
#[command(name = "netassist")]
#[command(about = "Network engineering assistant on a local Ollama model", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "NETASSIST_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "NETASSIST_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Model identifier (also used by the chatbot when given)
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Ollama base URL
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Send a prompt straight to the model
    Ask(AskCommand),

    /// Explain a topic through a prompt template
    Explain(ExplainCommand),

    /// Troubleshooting steps for a protocol (template | model | parser)
    Steps(StepsCommand),

    /// Questions for a senior network engineer (chat prompt)
    Qa(QaCommand),

    /// Describe a Cisco command (few-shot prompt)
    Describe(DescribeCommand),

    /// Symptoms to problem to commands to analysis
    Troubleshoot(TroubleshootCommand),

    /// Conversation with memory
    Converse(ConverseCommand),

    /// Network tools
    Tools(ToolsCommand),

    /// Tool-using agent
    Agent(AgentCommand),

    /// Documentation index and RAG
    Knowledge(KnowledgeCommand),

    /// Interactive network chatbot
    Chat(ChatCommand),

    /// Prompt library
    Prompts(PromptsCommand),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Ask(_) => "ask",
            Commands::Explain(_) => "explain",
            Commands::Steps(_) => "steps",
            Commands::Qa(_) => "qa",
            Commands::Describe(_) => "describe",
            Commands::Troubleshoot(_) => "troubleshoot",
            Commands::Converse(_) => "converse",
            Commands::Tools(_) => "tools",
            Commands::Agent(_) => "agent",
            Commands::Knowledge(_) => "knowledge",
            Commands::Chat(_) => "chat",
            Commands::Prompts(_) => "prompts",
        }
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // A .env file may carry OLLAMA_URL and device credentials
    let _ = dotenvy::dotenv();

    let mut config = AppConfig::load_from(cli.workspace.as_deref(), cli.config.as_deref())?
        .with_overrides(
            cli.workspace,
            cli.config,
            cli.model.clone(),
            cli.endpoint,
            cli.log_level,
            cli.verbose,
            cli.no_color,
        );
    if let Some(model) = cli.model {
        config.chat_model = model;
    }

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("NetAssist CLI starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Endpoint: {}", config.endpoint);
    tracing::debug!("Model: {} (chat: {})", config.model, config.chat_model);

    config.validate()?;
    config.ensure_netassist_dir()?;

    let _span = tracing::info_span!("command", name = cli.command.name()).entered();

    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Explain(cmd) => cmd.execute(&config).await,
        Commands::Steps(cmd) => cmd.execute(&config).await,
        Commands::Qa(cmd) => cmd.execute(&config).await,
        Commands::Describe(cmd) => cmd.execute(&config).await,
        Commands::Troubleshoot(cmd) => cmd.execute(&config).await,
        Commands::Converse(cmd) => cmd.execute(&config).await,
        Commands::Tools(cmd) => cmd.execute(&config).await,
        Commands::Agent(cmd) => cmd.execute(&config).await,
        Commands::Knowledge(cmd) => cmd.execute(&config).await,
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Prompts(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_chat_live_flag_and_globals() {
        let cli = Cli::try_parse_from([
            "netassist",
            "chat",
            "--live",
            "--model",
            "llama3.1",
            "--endpoint",
            "http://lab:11434",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Chat(ChatCommand { live: true })));
        assert_eq!(cli.model.as_deref(), Some("llama3.1"));
        assert_eq!(cli.endpoint.as_deref(), Some("http://lab:11434"));
    }

    #[test]
    fn test_knowledge_subcommands_parse() {
        for args in [
            vec!["netassist", "knowledge", "build"],
            vec!["netassist", "knowledge", "search", "CRC errors", "-k", "3"],
            vec!["netassist", "knowledge", "ask"],
            vec!["netassist", "knowledge", "stats", "--json"],
            vec!["netassist", "knowledge", "clean"],
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            assert_eq!(cli.command.name(), "knowledge");
        }
    }

    #[test]
    fn test_demo_defaults() {
        let cli = Cli::try_parse_from(["netassist", "explain"]).unwrap();
        match cli.command {
            Commands::Explain(cmd) => {
                assert_eq!(cmd.topic, "OSPF routing protocol");
                assert_eq!(cmd.audience, "beginner network engineer");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
