//! Single-step tool-using agent.
//!
//! The model picks one tool from the registry (or none), the tool runs, and
//! the model turns the tool result into the final answer.

use crate::assistant::Assistant;
use crate::chain::ChatChain;
use crate::router::parse_tool_selection;
use netassist_core::{AppError, AppResult};
use netassist_prompt::vars;
use netassist_tools::ToolRegistry;
use serde::Serialize;

/// Trace of one agent run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgentRun {
    pub question: String,
    /// Raw router reply.
    pub router_response: String,
    pub tool: Option<String>,
    pub tool_input: Option<String>,
    pub tool_result: Option<String>,
    pub answer: String,
}

pub struct ToolAgent {
    router: ChatChain,
    finaliser: ChatChain,
    registry: ToolRegistry,
}

impl ToolAgent {
    pub fn new(assistant: &Assistant, registry: ToolRegistry) -> AppResult<Self> {
        Ok(Self {
            router: assistant.chat_chain("agent.router")?,
            finaliser: assistant.chat_chain("agent.final")?,
            registry,
        })
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub async fn run(&self, question: &str) -> AppResult<AgentRun> {
        let tools = self.registry.describe();
        let router_response = self
            .router
            .invoke(&vars([("tools", tools.as_str()), ("question", question)]))
            .await?;
        tracing::debug!(response = %router_response, "Router decision");

        let selection = parse_tool_selection(&router_response);
        let mut run = AgentRun {
            question: question.to_string(),
            router_response: router_response.clone(),
            tool: selection.tool.clone(),
            tool_input: selection.input.clone(),
            ..AgentRun::default()
        };

        let Some(tool) = selection.tool_name().map(str::to_string) else {
            tracing::info!("No tool needed");
            run.answer = selection.answer.unwrap_or(router_response);
            return Ok(run);
        };

        let tool = tool.as_str();
        if !self.registry.contains(tool) {
            tracing::warn!(tool, "Model selected an unknown tool");
            run.answer = format!("Unknown tool: {}", tool);
            return Ok(run);
        }

        let input = selection.input.as_deref().unwrap_or_default();
        tracing::info!(tool, input, "Executing tool");
        let result = match self.registry.invoke(tool, input).await {
            Ok(output) => output,
            Err(AppError::Tool(msg)) => format!("Error invoking tool: {}", msg),
            Err(e) => format!("Error invoking tool: {}", e),
        };

        run.answer = self
            .finaliser
            .invoke(&vars([("question", question), ("result", result.as_str())]))
            .await?;
        run.tool_result = Some(result);
        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::PromptResolver;
    use netassist_llm::ScriptedClient;
    use netassist_tools::simulated_registry;
    use std::sync::Arc;

    fn agent(client: Arc<ScriptedClient>) -> ToolAgent {
        let assistant = Assistant::new(client, "qwen2.5", PromptResolver::builtin());
        ToolAgent::new(&assistant, simulated_registry()).unwrap()
    }

    #[tokio::test]
    async fn test_tool_result_feeds_final_answer() {
        let client = Arc::new(ScriptedClient::new([
            "TOOL: lookup_vlan\nINPUT: 10",
            "VLAN 10 is USERS on 192.168.10.0/24.",
        ]));
        let run = agent(client.clone()).run("What subnet is VLAN 10 on?").await.unwrap();

        assert_eq!(run.tool.as_deref(), Some("lookup_vlan"));
        assert_eq!(
            run.tool_result.as_deref(),
            Some("VLAN 10: Name=USERS, Subnet=192.168.10.0/24, Gateway=192.168.10.1")
        );
        assert_eq!(run.answer, "VLAN 10 is USERS on 192.168.10.0/24.");

        let requests = client.requests();
        assert!(requests[0].text().contains("2. lookup_vlan - "));
        assert!(requests[1].text().contains(
            "Tool result: VLAN 10: Name=USERS, Subnet=192.168.10.0/24, Gateway=192.168.10.1"
        ));
    }

    #[tokio::test]
    async fn test_no_tool_returns_direct_answer() {
        let client = Arc::new(ScriptedClient::new(["TOOL: none\nANSWER: Cost."]));
        let run = agent(client.clone()).run("What metric does OSPF use?").await.unwrap();
        assert_eq!(run.answer, "Cost.");
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_returned_raw() {
        let client = Arc::new(ScriptedClient::new(["OSPF uses cost."]));
        let run = agent(client).run("What metric does OSPF use?").await.unwrap();
        assert_eq!(run.answer, "OSPF uses cost.");
        assert_eq!(run.tool, None);
    }

    #[tokio::test]
    async fn test_unknown_tool_skips_final_call() {
        let client = Arc::new(ScriptedClient::new(["TOOL: traceroute\nINPUT: 8.8.8.8"]));
        let run = agent(client.clone()).run("Trace to 8.8.8.8").await.unwrap();
        assert_eq!(run.answer, "Unknown tool: traceroute");
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_coercion_error_is_rendered_for_the_model() {
        let client = Arc::new(ScriptedClient::new([
            "TOOL: lookup_vlan\nINPUT: users",
            "I could not look that VLAN up.",
        ]));
        let run = agent(client).run("Which VLAN is users?").await.unwrap();
        let result = run.tool_result.unwrap();
        assert!(result.starts_with("Error invoking tool: invalid integer 'users' for lookup_vlan"));
        assert_eq!(run.answer, "I could not look that VLAN up.");
    }
}
