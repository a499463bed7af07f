//! Prompt definitions shipped with the crate.

use crate::types::PromptDefinition;
use netassist_core::{AppError, AppResult};

const BUILTIN_PROMPTS: &[(&str, &str)] = &[
    ("network.explain", include_str!("../prompts/network.explain.yml")),
    ("network.steps", include_str!("../prompts/network.steps.yml")),
    ("network.qa", include_str!("../prompts/network.qa.yml")),
    ("network.describe", include_str!("../prompts/network.describe.yml")),
    ("troubleshoot.identify", include_str!("../prompts/troubleshoot.identify.yml")),
    ("troubleshoot.commands", include_str!("../prompts/troubleshoot.commands.yml")),
    ("troubleshoot.analyze", include_str!("../prompts/troubleshoot.analyze.yml")),
    ("memory.chat", include_str!("../prompts/memory.chat.yml")),
    ("agent.router", include_str!("../prompts/agent.router.yml")),
    ("agent.final", include_str!("../prompts/agent.final.yml")),
    ("rag.answer", include_str!("../prompts/rag.answer.yml")),
    ("chatbot.router", include_str!("../prompts/chatbot.router.yml")),
    ("chatbot.response", include_str!("../prompts/chatbot.response.yml")),
    ("chatbot.live.router", include_str!("../prompts/chatbot.live.router.yml")),
    ("chatbot.live.response", include_str!("../prompts/chatbot.live.response.yml")),
];

/// Ids of all built-in prompts.
pub fn builtin_ids() -> impl Iterator<Item = &'static str> {
    BUILTIN_PROMPTS.iter().map(|(id, _)| *id)
}

/// Parse the built-in prompt with the given id, if there is one.
pub fn builtin_prompt(id: &str) -> Option<AppResult<PromptDefinition>> {
    BUILTIN_PROMPTS
        .iter()
        .find(|(builtin_id, _)| *builtin_id == id)
        .map(|(_, yaml)| {
            serde_yaml::from_str(yaml).map_err(|e| {
                AppError::Prompt(format!("Failed to parse built-in prompt {}: {}", id, e))
            })
        })
}
