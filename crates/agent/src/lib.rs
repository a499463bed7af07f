//! Chains, memory and agents for NetAssist.
//!
//! - Single-call helpers and the sequential troubleshooting workflow
//! - Conversation memory with per-session histories
//! - A tool-selecting agent and the interactive network chatbot

pub mod assistant;
pub mod chain;
pub mod chatbot;
pub mod memory;
pub mod prompts;
pub mod router;
pub mod sequential;
pub mod tool_agent;

// Re-export commonly used types
pub use assistant::Assistant;
pub use chain::{ChatChain, LlmChain, StrOutputParser, TextPrompt};
pub use chatbot::{ChatTurn, DocSource, Flavour, NetworkChatbot, DIRECT_CONTEXT};
pub use memory::{ChatHistory, ConversationChain, SessionStore, DEFAULT_SESSION};
pub use prompts::PromptResolver;
pub use router::{parse_router_decision, parse_tool_selection, RouterDecision, ToolSelection};
pub use sequential::{TroubleshootReport, TroubleshootWorkflow};
pub use tool_agent::{AgentRun, ToolAgent};
