//! Template, chain, chat-prompt, few-shot and sequential workflow commands.

use clap::Args;
use netassist_core::{config::AppConfig, AppResult};

use super::{assistant, print_json, rule};

/// Explain a topic to an audience
#[derive(Args, Debug)]
pub struct ExplainCommand {
    /// Topic to explain
    #[arg(default_value = "OSPF routing protocol")]
    pub topic: String,

    /// Who the explanation is for
    #[arg(short, long, default_value = "beginner network engineer")]
    pub audience: String,
}

impl ExplainCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing explain command");
        let answer = assistant(config, &config.model)?
            .explain(&self.topic, &self.audience)
            .await?;
        println!("{}", answer);
        Ok(())
    }
}

/// List common troubleshooting steps for a protocol
#[derive(Args, Debug)]
pub struct StepsCommand {
    /// Protocol name
    #[arg(default_value = "BGP")]
    pub protocol: String,
}

impl StepsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing steps command");
        let answer = assistant(config, &config.model)?
            .troubleshooting_steps(&self.protocol)
            .await?;
        println!("{}", answer);
        Ok(())
    }
}

const DEFAULT_QUESTIONS: [&str; 3] = [
    "What causes OSPF to be stuck in EXSTART state?",
    "When would you use eBGP multihop?",
    "What is the difference between access and trunk ports?",
];

/// Ask a senior network engineer
#[derive(Args, Debug)]
pub struct QaCommand {
    /// Questions to ask, one call each
    pub questions: Vec<String>,
}

impl QaCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing qa command");
        let assistant = assistant(config, &config.model)?;

        let questions: Vec<&str> = if self.questions.is_empty() {
            DEFAULT_QUESTIONS.to_vec()
        } else {
            self.questions.iter().map(String::as_str).collect()
        };

        for question in questions {
            println!("Q: {}", question);
            let answer = assistant.ask_senior_engineer(question).await?;
            println!("A: {}\n", answer);
            println!("{}\n", rule('-', 50));
        }

        Ok(())
    }
}

/// Describe a Cisco command from a few examples
#[derive(Args, Debug)]
pub struct DescribeCommand {
    /// Command to describe
    #[arg(default_value = "show cdp neighbors")]
    pub command: String,
}

impl DescribeCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing describe command");
        let answer = assistant(config, &config.model)?
            .describe_command(&self.command)
            .await?;
        println!("{}", answer);
        Ok(())
    }
}

const DEFAULT_SYMPTOMS: &str = "Users in VLAN 10 can ping the gateway but cannot reach servers in VLAN 20. \
Inter-VLAN routing was working yesterday.";

/// Three-step troubleshooting workflow
#[derive(Args, Debug)]
pub struct TroubleshootCommand {
    /// Observed symptoms
    #[arg(default_value = DEFAULT_SYMPTOMS)]
    pub symptoms: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl TroubleshootCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing troubleshoot command");
        let report = assistant(config, &config.model)?
            .troubleshoot_workflow(&self.symptoms)
            .await?;

        if self.json {
            return print_json(&report);
        }

        println!("IDENTIFIED PROBLEM:\n{}\n", report.problem);
        println!("TROUBLESHOOTING COMMANDS:\n{}\n", report.commands);
        println!("WHAT TO LOOK FOR:\n{}\n", report.analysis);
        Ok(())
    }
}
