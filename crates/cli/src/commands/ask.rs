//! Ask command handler.
//!
//! Sends a prompt to the model as is, streamed or in one piece.

use clap::Args;
use futures::StreamExt;
use netassist_core::{config::AppConfig, AppError, AppResult};
use netassist_llm::{LlmClient, LlmRequest, LlmUsage};
use std::path::PathBuf;

use super::{llm_client, print_json};

const DEFAULT_PROMPT: &str = "Explain what BGP is in two sentences.";

/// Send a prompt straight to the model
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The prompt to send
    pub prompt: Option<String>,

    /// Read the prompt from a file
    #[arg(short, long, conflicts_with = "prompt")]
    pub file: Option<PathBuf>,

    /// Stream the answer as it is generated
    #[arg(long)]
    pub stream: bool,

    /// Maximum tokens in response
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Temperature for response generation (0.0-2.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let prompt = self.get_prompt()?;
        let client = llm_client(config)?;

        let mut request = LlmRequest::new(prompt, config.model.as_str());
        if let Some(max_tokens) = self.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }
        if let Some(temperature) = self.temperature {
            request = request.with_temperature(temperature);
        }

        if self.stream {
            self.handle_streaming(client.as_ref(), &request.with_streaming(), config)
                .await
        } else {
            self.handle_non_streaming(client.as_ref(), &request, config)
                .await
        }
    }

    async fn handle_non_streaming(
        &self,
        client: &dyn LlmClient,
        request: &LlmRequest,
        config: &AppConfig,
    ) -> AppResult<()> {
        tracing::info!("Sending non-streaming request to LLM");

        let response = client.complete(request).await?;

        if self.json {
            print_json(&answer_json(
                &response.content,
                &response.model,
                config,
                Some(&response.usage),
            ))?;
        } else {
            println!("{}", response.content);
            log_usage(Some(&response.usage));
        }

        Ok(())
    }

    async fn handle_streaming(
        &self,
        client: &dyn LlmClient,
        request: &LlmRequest,
        config: &AppConfig,
    ) -> AppResult<()> {
        tracing::info!("Starting streaming request to LLM");

        let mut stream = client.stream(request).await?;
        let mut full_content = String::new();
        let mut final_usage = None;

        while let Some(result) = stream.next().await {
            let chunk = result?;

            if !chunk.content.is_empty() {
                full_content.push_str(&chunk.content);

                if !self.json {
                    print!("{}", chunk.content);
                    use std::io::Write;
                    std::io::stdout().flush().ok();
                }
            }

            if chunk.done {
                final_usage = chunk.usage;
                break;
            }
        }

        if self.json {
            print_json(&answer_json(
                &full_content,
                &request.model,
                config,
                final_usage.as_ref(),
            ))?;
        } else {
            println!();
            log_usage(final_usage.as_ref());
        }

        Ok(())
    }

    fn get_prompt(&self) -> AppResult<String> {
        if let Some(path) = &self.file {
            return std::fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!("Failed to read prompt file {:?}: {}", path, e))
            });
        }

        Ok(self
            .prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_PROMPT.to_string()))
    }
}

fn answer_json(
    answer: &str,
    model: &str,
    config: &AppConfig,
    usage: Option<&LlmUsage>,
) -> serde_json::Value {
    serde_json::json!({
        "answer": answer,
        "model": model,
        "provider": config.provider,
        "usage": {
            "promptTokens": usage.map(|u| u.prompt_tokens).unwrap_or(0),
            "completionTokens": usage.map(|u| u.completion_tokens).unwrap_or(0),
            "totalTokens": usage.map(|u| u.total_tokens).unwrap_or(0)
        }
    })
}

fn log_usage(usage: Option<&LlmUsage>) {
    if let Some(usage) = usage {
        tracing::debug!(
            "Token usage - Prompt: {}, Completion: {}, Total: {}",
            usage.prompt_tokens,
            usage.completion_tokens,
            usage.total_tokens
        );
    }
}
