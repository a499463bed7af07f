//! Prompts command handler.

use clap::Args;
use netassist_agent::PromptResolver;
use netassist_core::{config::AppConfig, AppResult};
use netassist_prompt::{available_prompts, validate_prompt};

use super::print_json;

/// List the prompts, or show one
#[derive(Args, Debug)]
pub struct PromptsCommand {
    /// Prompt id to show in full
    pub id: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl PromptsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing prompts command");

        if let Some(id) = &self.id {
            let def = PromptResolver::workspace(&config.workspace).get(id)?;
            validate_prompt(&def)?;

            if self.json {
                return print_json(&def);
            }

            println!("{} - {}", def.id, def.title);
            if !def.description.is_empty() {
                println!("{}", def.description);
            }
            println!("Variables: {}", def.variables().join(", "));
            if let Some(system) = &def.system {
                println!("\n[system]\n{}", system);
            }
            if let Some(history) = &def.history {
                println!("\n[history: {}]", history);
            }
            if let Some(prefix) = &def.prefix {
                println!("\n[prefix]\n{}", prefix);
            }
            println!("\n[template]\n{}", def.template);
            return Ok(());
        }

        let prompts = available_prompts(&config.workspace)?;

        if self.json {
            let list: Vec<_> = prompts
                .iter()
                .map(|(def, source)| {
                    serde_json::json!({
                        "id": def.id,
                        "title": def.title,
                        "source": source.to_string(),
                        "variables": def.variables(),
                    })
                })
                .collect();
            return print_json(&list);
        }

        for (def, source) in &prompts {
            println!("{:<24} {:<10} {}", def.id, source.to_string(), def.title);
        }

        Ok(())
    }
}
