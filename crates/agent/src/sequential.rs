//! Three-step troubleshooting workflow where each step feeds the next.

use crate::assistant::Assistant;
use crate::chain::LlmChain;
use netassist_core::AppResult;
use netassist_prompt::vars;
use serde::Serialize;

/// Output of every step of the workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TroubleshootReport {
    pub symptoms: String,
    pub problem: String,
    pub commands: String,
    pub analysis: String,
}

/// symptoms → problem → commands → what to look for.
pub struct TroubleshootWorkflow {
    identify: LlmChain,
    commands: LlmChain,
    analyze: LlmChain,
}

impl TroubleshootWorkflow {
    pub fn new(assistant: &Assistant) -> AppResult<Self> {
        Ok(Self {
            identify: assistant.text_chain("troubleshoot.identify")?,
            commands: assistant.text_chain("troubleshoot.commands")?,
            analyze: assistant.text_chain("troubleshoot.analyze")?,
        })
    }

    pub async fn run(&self, symptoms: &str) -> AppResult<TroubleshootReport> {
        tracing::info!("Step 1/3: identifying the problem");
        let problem = self.identify.invoke(&vars([("symptoms", symptoms)])).await?;

        tracing::info!("Step 2/3: choosing troubleshooting commands");
        let commands = self.commands.invoke(&vars([("problem", problem.as_str())])).await?;

        tracing::info!("Step 3/3: explaining the output to look for");
        let analysis = self.analyze.invoke(&vars([("commands", commands.as_str())])).await?;

        Ok(TroubleshootReport {
            symptoms: symptoms.to_string(),
            problem,
            commands,
            analysis,
        })
    }
}

impl Assistant {
    /// Run [`TroubleshootWorkflow`] for `symptoms`.
    pub async fn troubleshoot_workflow(&self, symptoms: &str) -> AppResult<TroubleshootReport> {
        TroubleshootWorkflow::new(self)?.run(symptoms).await
    }
}
