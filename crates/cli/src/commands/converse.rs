//! Conversation-with-memory command.

use clap::Args;
use netassist_agent::{ConversationChain, DEFAULT_SESSION};
use netassist_core::{config::AppConfig, AppResult};

use super::{assistant, rule};

/// Chat with memory across turns and sessions
#[derive(Args, Debug)]
pub struct ConverseCommand {
    /// Questions to ask in order; omit to run the two-session demo
    pub questions: Vec<String>,

    /// Session the questions belong to
    #[arg(short, long, default_value = DEFAULT_SESSION)]
    pub session: String,
}

impl ConverseCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing converse command");

        let chain = assistant(config, &config.model)?.chat_chain("memory.chat")?;
        let mut conversation = ConversationChain::new(chain, "history");

        if !self.questions.is_empty() {
            for question in &self.questions {
                ask(&mut conversation, question, &self.session).await?;
            }
            return Ok(());
        }

        for question in [
            "What is OSPF?",
            "What are its main area types?",
            "Which one would I use for a stub network?",
        ] {
            ask(&mut conversation, question, DEFAULT_SESSION).await?;
        }

        println!("{}", rule('=', 50));
        println!("Starting a NEW session (different user):");
        println!("{}\n", rule('=', 50));

        for question in ["What is BGP?", "What did we discuss earlier?"] {
            ask(&mut conversation, question, "user2").await?;
        }

        Ok(())
    }
}

async fn ask(conversation: &mut ConversationChain, question: &str, session: &str) -> AppResult<()> {
    println!("Q: {}", question);
    let answer = conversation.chat(question, session).await?;
    println!("A: {}\n", answer);
    Ok(())
}
