//! Interactive network chatbot combining tools, documentation search and memory.
//!
//! Every question goes through two model calls at most: a router that picks
//! a tool, a documentation search or a direct answer, and a responder that
//! answers from the gathered context. Both see the conversation so far.

use crate::assistant::Assistant;
use crate::chain::ChatChain;
use crate::memory::ChatHistory;
use crate::router::{parse_router_decision, RouterDecision};
use netassist_core::{AppError, AppResult};
use netassist_knowledge::{search_documentation, VectorStore};
use netassist_prompt::{vars, PromptVars};
use netassist_tools::{live_registry, simulated_registry, DeviceInventory, DeviceTransport, ToolRegistry};
use std::sync::Arc;

/// Context used when the router neither picked a tool nor answered.
pub const DIRECT_CONTEXT: &str = "Answer based on your networking knowledge.";

/// Which tool set the chatbot drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavour {
    /// Built-in lab data.
    Simulated,
    /// Commands run on real devices.
    Live,
}

impl Flavour {
    fn prompt_ids(self) -> (&'static str, &'static str) {
        match self {
            Flavour::Simulated => ("chatbot.router", "chatbot.response"),
            Flavour::Live => ("chatbot.live.router", "chatbot.live.response"),
        }
    }

    fn tool_trace(self, name: &str, input: &str) -> String {
        match self {
            Flavour::Simulated => format!("  [Tool: {}({})]", name, input),
            Flavour::Live => format!("  [Executing: {}({})]", name, input),
        }
    }

    fn docs_trace(self, query: &str) -> String {
        match self {
            Flavour::Simulated => format!("  [Docs: {}]", query),
            Flavour::Live => format!("  [Searching docs: {}]", query),
        }
    }

    fn docs_error(self, reason: &str) -> String {
        match self {
            Flavour::Simulated => format!("Documentation search error: {}", reason),
            Flavour::Live => format!("Documentation search unavailable: {}", reason),
        }
    }
}

/// Where documentation passages come from.
#[derive(Clone)]
pub enum DocSource {
    Store { store: Arc<VectorStore>, k: usize },
    /// The index could not be opened; searches report the reason.
    Unavailable(String),
}

impl DocSource {
    /// Wrap the outcome of opening the index.
    pub fn from_open(result: AppResult<VectorStore>, k: usize) -> Self {
        match result {
            Ok(store) => DocSource::Store {
                store: Arc::new(store),
                k,
            },
            Err(e) => {
                tracing::warn!("Documentation search disabled: {}", e);
                DocSource::Unavailable(e.to_string())
            }
        }
    }
}

/// One answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub answer: String,
    /// Tool or search the router chose, as shown to the user.
    pub trace: Option<String>,
    pub decision: RouterDecision,
}

pub struct NetworkChatbot {
    flavour: Flavour,
    router: ChatChain,
    responder: ChatChain,
    registry: ToolRegistry,
    docs: DocSource,
    devices: Option<String>,
    history: ChatHistory,
}

impl NetworkChatbot {
    /// Chatbot over the simulated lab tools.
    pub fn simulated(assistant: &Assistant, docs: DocSource) -> AppResult<Self> {
        Self::build(assistant, Flavour::Simulated, simulated_registry(), docs, None)
    }

    /// Chatbot over real devices reached through `transport`.
    pub fn live(
        assistant: &Assistant,
        docs: DocSource,
        transport: Arc<dyn DeviceTransport>,
        inventory: DeviceInventory,
    ) -> AppResult<Self> {
        let devices = inventory.available();
        let registry = live_registry(transport, inventory);
        Self::build(assistant, Flavour::Live, registry, docs, Some(devices))
    }

    fn build(
        assistant: &Assistant,
        flavour: Flavour,
        registry: ToolRegistry,
        docs: DocSource,
        devices: Option<String>,
    ) -> AppResult<Self> {
        let (router_id, response_id) = flavour.prompt_ids();
        Ok(Self {
            flavour,
            router: assistant.chat_chain(router_id)?,
            responder: assistant.chat_chain(response_id)?,
            registry,
            docs,
            devices,
            history: ChatHistory::new(),
        })
    }

    pub fn flavour(&self) -> Flavour {
        self.flavour
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Comma-separated device names for the live flavour.
    pub fn devices(&self) -> Option<&str> {
        self.devices.as_deref()
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        tracing::debug!("Chat history cleared");
    }

    pub async fn chat(&mut self, question: &str) -> AppResult<ChatTurn> {
        let tools = self.registry.describe();
        let mut router_vars = vars([("tools", tools.as_str()), ("question", question)]);
        if let Some(devices) = &self.devices {
            router_vars.insert("devices".to_string(), devices.clone());
        }

        let router_response = self.ask(&self.router, &router_vars).await?;
        let decision = parse_router_decision(&router_response);
        tracing::debug!(?decision, "Router decision");

        let (context, trace) = match &decision {
            RouterDecision::Tool { name, input } => (
                self.execute_tool(name, input).await,
                Some(self.flavour.tool_trace(name, input)),
            ),
            RouterDecision::Docs { query } => {
                let query = query.as_deref().unwrap_or(question);
                (self.search_docs(query).await, Some(self.flavour.docs_trace(query)))
            }
            RouterDecision::Direct { answer: Some(answer) } => {
                self.history.add_turn(question, answer.as_str());
                return Ok(ChatTurn {
                    answer: answer.clone(),
                    trace: None,
                    decision: decision.clone(),
                });
            }
            RouterDecision::Direct { answer: None } => (DIRECT_CONTEXT.to_string(), None),
            RouterDecision::Unrecognised { raw: action } => {
                tracing::warn!(?action, "Router gave no usable action");
                (String::new(), None)
            }
        };

        let response_vars = vars([("question", question), ("context", context.as_str())]);
        let answer = self.ask(&self.responder, &response_vars).await?;
        self.history.add_turn(question, answer.as_str());

        Ok(ChatTurn {
            answer,
            trace,
            decision,
        })
    }

    async fn ask(&self, chain: &ChatChain, variables: &PromptVars) -> AppResult<String> {
        chain
            .invoke_with_history(variables, &[("history", self.history.messages())])
            .await
    }

    /// Run a tool and render any failure as text for the responder.
    async fn execute_tool(&self, name: &str, input: &str) -> String {
        if !self.registry.contains(name) {
            tracing::warn!(tool = name, "Router selected an unknown tool");
            return match self.flavour {
                Flavour::Simulated => format!("Unknown tool: {}", name),
                Flavour::Live => format!(
                    "Unknown tool: {}. Available: {}",
                    name,
                    self.registry.names().join(", ")
                ),
            };
        }

        tracing::info!(tool = name, input, "Executing tool");
        match self.registry.invoke(name, input).await {
            Ok(output) => output,
            Err(AppError::Tool(msg)) => format!("Tool error: {}", msg),
            Err(e) => format!("Tool error: {}", e),
        }
    }

    async fn search_docs(&self, query: &str) -> String {
        match &self.docs {
            DocSource::Store { store, k } => search_documentation(store, query, *k).await,
            DocSource::Unavailable(reason) => self.flavour.docs_error(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::PromptResolver;
    use netassist_core::ChatMessage;
    use netassist_llm::ScriptedClient;
    use netassist_tools::UnavailableTransport;

    fn assistant(client: Arc<ScriptedClient>) -> Assistant {
        Assistant::new(client, "qwen2.5", PromptResolver::builtin())
    }

    fn no_docs() -> DocSource {
        DocSource::Unavailable("no index".to_string())
    }

    #[tokio::test]
    async fn test_direct_answer_skips_responder() {
        let client = Arc::new(ScriptedClient::new(["ACTION: DIRECT\nANSWER: OSPF uses cost."]));
        let mut bot = NetworkChatbot::simulated(&assistant(client.clone()), no_docs()).unwrap();

        let turn = bot.chat("What metric does OSPF use?").await.unwrap();
        assert_eq!(turn.answer, "OSPF uses cost.");
        assert_eq!(turn.trace, None);
        assert_eq!(client.requests().len(), 1);
        assert_eq!(
            bot.history().messages(),
            &[
                ChatMessage::human("What metric does OSPF use?"),
                ChatMessage::ai("OSPF uses cost.")
            ]
        );
    }

    #[tokio::test]
    async fn test_tool_output_reaches_responder() {
        let client = Arc::new(ScriptedClient::new([
            "ACTION: TOOL\nTOOL_NAME: get_bgp_summary\nTOOL_INPUT: R1",
            "Peer 10.0.0.4 is down.",
        ]));
        let mut bot = NetworkChatbot::simulated(&assistant(client.clone()), no_docs()).unwrap();

        let turn = bot.chat("Any BGP problems on R1?").await.unwrap();
        assert_eq!(turn.trace.as_deref(), Some("  [Tool: get_bgp_summary(R1)]"));
        assert_eq!(turn.answer, "Peer 10.0.0.4 is down.");

        let requests = client.requests();
        assert!(requests[1].text().contains("BGP summary for R1:"));
    }

    #[tokio::test]
    async fn test_docs_without_index_reports_error_as_context() {
        let client = Arc::new(ScriptedClient::new([
            "ACTION: DOCS",
            "Check MTU on both sides.",
        ]));
        let mut bot = NetworkChatbot::simulated(&assistant(client.clone()), no_docs()).unwrap();

        let turn = bot.chat("OSPF stuck in EXSTART").await.unwrap();
        assert_eq!(turn.trace.as_deref(), Some("  [Docs: OSPF stuck in EXSTART]"));
        assert!(client.requests()[1]
            .text()
            .contains("Context:\nDocumentation search error: no index"));
    }

    #[tokio::test]
    async fn test_unknown_tool_lists_live_tools() {
        let client = Arc::new(ScriptedClient::new([
            "ACTION: TOOL\nTOOL_NAME: traceroute\nTOOL_INPUT: R1",
            "That tool does not exist.",
        ]));
        let mut bot = NetworkChatbot::live(
            &assistant(client.clone()),
            no_docs(),
            Arc::new(UnavailableTransport),
            DeviceInventory::default(),
        )
        .unwrap();

        bot.chat("traceroute from R1").await.unwrap();
        let text = client.requests()[1].text();
        assert!(text.contains("Unknown tool: traceroute. Available: health_check, "));
    }

    #[tokio::test]
    async fn test_answer_without_action_still_runs_responder() {
        let client = Arc::new(ScriptedClient::new(["ANSWER: 42", "generated"]));
        let mut bot = NetworkChatbot::simulated(&assistant(client.clone()), no_docs()).unwrap();

        let turn = bot.chat("q").await.unwrap();
        assert_eq!(turn.answer, "generated");
        assert_eq!(turn.decision, RouterDecision::Unrecognised { raw: None });
        assert_eq!(client.requests().len(), 2);
        assert!(client.requests()[1].text().contains("Context:\n\n\nAnswer:"));
    }

    #[tokio::test]
    async fn test_unknown_action_answers_with_empty_context() {
        let client = Arc::new(ScriptedClient::new([
            "ACTION: SEARCH\nQUERY: bgp\nANSWER: skip me",
            "BGP peers are configured per neighbor.",
        ]));
        let mut bot = NetworkChatbot::simulated(&assistant(client.clone()), no_docs()).unwrap();

        let turn = bot.chat("How is BGP configured?").await.unwrap();
        assert_eq!(turn.answer, "BGP peers are configured per neighbor.");
        assert_eq!(turn.trace, None);
        let text = client.requests()[1].text();
        assert!(!text.contains(DIRECT_CONTEXT));
        assert!(!text.contains("skip me"));
        assert_eq!(bot.history().len(), 2);
    }

    #[tokio::test]
    async fn test_clear_history() {
        let client = Arc::new(ScriptedClient::new(["ACTION: DIRECT\nANSWER: Hi."]));
        let mut bot = NetworkChatbot::simulated(&assistant(client), no_docs()).unwrap();
        bot.chat("hello").await.unwrap();
        assert_eq!(bot.history().len(), 2);
        bot.clear_history();
        assert!(bot.history().is_empty());
    }
}
