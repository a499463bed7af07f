//! Interactive chatbot command.

use clap::Args;
use netassist_agent::{DocSource, NetworkChatbot};
use netassist_core::{config::AppConfig, AppResult};
use netassist_knowledge::open_store;
use netassist_tools::{default_transport, DeviceInventory};
use std::io::Write as _;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{assistant, rule};

/// Interactive network assistant with tools, documentation and memory
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Connect the tools to real lab devices
    #[arg(long)]
    pub live: bool,
}

impl ChatCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!(live = self.live, "Executing chat command");

        let assistant = assistant(config, &config.chat_model)?;
        let docs = DocSource::from_open(open_store(config), config.knowledge.search_k);

        let mut chatbot = if self.live {
            let inventory = DeviceInventory::from_config(config)?;
            NetworkChatbot::live(&assistant, docs, default_transport(), inventory)?
        } else {
            NetworkChatbot::simulated(&assistant, docs)?
        };

        print_banner(&chatbot, &config.chat_model);
        run_loop(&mut chatbot).await
    }
}

fn print_banner(chatbot: &NetworkChatbot, model: &str) {
    println!("{}", rule('=', 60));
    match chatbot.devices() {
        Some(devices) => {
            println!("NETWORK ENGINEERING ASSISTANT - LIVE LAB");
            println!("Model: {}", model);
            println!("{}", rule('=', 60));
            println!("\n⚠️  CONNECTED TO REAL DEVICES - Commands will execute!");
            println!("\nAvailable devices: {}", devices);
            println!("\nCapabilities:");
            println!("  • Health checks, OSPF, BGP, interfaces, routing");
            println!("  • Send any command to any device");
            println!("  • Troubleshooting guidance from documentation");
        }
        None => {
            println!("NETWORK ENGINEERING ASSISTANT");
            println!("Model: {}", model);
            println!("{}", rule('=', 60));
            println!("\nCapabilities:");
            println!("  • Device status (OSPF, BGP, interfaces, routing)");
            println!("  • Network calculations (subnets, VLANs)");
            println!("  • Troubleshooting guidance (from documentation)");
            println!("  • Conversation memory (remembers context)");
        }
    }
    println!("\nCommands: 'quit' to exit, 'clear' to reset history");
    println!("{}", rule('=', 60));
}

async fn run_loop(chatbot: &mut NetworkChatbot) -> AppResult<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\nYou: ");
        let _ = std::io::stdout().flush();

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };

        let Some(line) = line else {
            println!("\nGoodbye!");
            break;
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("quit") {
            println!("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("clear") {
            chatbot.clear_history();
            println!("History cleared.");
            continue;
        }

        let turn = chatbot.chat(input).await?;
        if let Some(trace) = &turn.trace {
            println!("{}", trace);
        }
        println!("\nAssistant: {}", turn.answer);
    }

    Ok(())
}
