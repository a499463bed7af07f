//! Tool-using agent command.

use clap::Args;
use netassist_agent::ToolAgent;
use netassist_core::{config::AppConfig, AppResult};
use netassist_tools::simulated_registry;

use super::{assistant, print_json, rule};

const DEFAULT_QUESTIONS: [&str; 8] = [
    "What subnet is VLAN 10 on?",
    "Is GigabitEthernet0/2 up?",
    "Calculate the subnet details for 172.16.0.0/20",
    "Can you ping 192.168.10.1?",
    "Show me the routing table for R1",
    "What are the OSPF neighbors on R2?",
    "Is there a BGP peering issue on R1?",
    "Are there any errors on GigabitEthernet0/2?",
];

/// Let the model pick a tool and answer from its result
#[derive(Args, Debug)]
pub struct AgentCommand {
    /// Questions to run; omit to run the built-in set
    pub questions: Vec<String>,

    /// Output each run as JSON
    #[arg(long)]
    pub json: bool,
}

impl AgentCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing agent command");
        let agent = ToolAgent::new(&assistant(config, &config.model)?, simulated_registry())?;

        let questions: Vec<&str> = if self.questions.is_empty() {
            DEFAULT_QUESTIONS.to_vec()
        } else {
            self.questions.iter().map(String::as_str).collect()
        };

        if !self.json {
            println!("{}", rule('=', 50));
            println!("TOOL-USING AGENT TEST");
            println!("{}", rule('=', 50));
        }

        let mut runs = Vec::new();
        for question in questions {
            let run = agent.run(question).await?;
            if self.json {
                runs.push(run);
                continue;
            }

            println!("\nQuestion: {}", run.question);
            println!("{}", rule('-', 40));
            println!("Model's decision:\n{}\n", run.router_response);
            match (&run.tool_result, &run.tool) {
                (Some(result), Some(tool)) => {
                    println!("Executing tool: {}", tool);
                    println!("With input: {}", run.tool_input.as_deref().unwrap_or_default());
                    println!("\nTool result: {}", result);
                }
                _ => println!("No tool executed."),
            }
            println!("\nFinal Answer: {}", run.answer);
            println!("\n{}", rule('=', 50));
        }

        if self.json {
            print_json(&runs)?;
        }

        Ok(())
    }
}
