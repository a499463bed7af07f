//! One-shot prompt, template, chat and few-shot calls.

use crate::chain::{ChatChain, LlmChain};
use crate::prompts::PromptResolver;
use netassist_core::AppResult;
use netassist_llm::{LlmClient, LlmRequest};
use netassist_prompt::vars;
use std::sync::Arc;

/// Model client, model name and prompt lookup shared by the single-call helpers.
#[derive(Clone)]
pub struct Assistant {
    llm: Arc<dyn LlmClient>,
    model: String,
    prompts: PromptResolver,
}

impl Assistant {
    pub fn new(llm: Arc<dyn LlmClient>, model: impl Into<String>, prompts: PromptResolver) -> Self {
        Self {
            llm,
            model: model.into(),
            prompts,
        }
    }

    pub fn llm(&self) -> &Arc<dyn LlmClient> {
        &self.llm
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn prompts(&self) -> &PromptResolver {
        &self.prompts
    }

    /// Text chain for a prompt id.
    pub fn text_chain(&self, prompt_id: &str) -> AppResult<LlmChain> {
        LlmChain::from_definition(self.llm.clone(), self.model.as_str(), &self.prompts.get(prompt_id)?)
    }

    /// Chat chain for a prompt id.
    pub fn chat_chain(&self, prompt_id: &str) -> AppResult<ChatChain> {
        Ok(ChatChain::from_definition(
            self.llm.clone(),
            self.model.as_str(),
            &self.prompts.get(prompt_id)?,
        ))
    }

    /// Send `prompt` to the model as is.
    pub async fn basic_prompt(&self, prompt: &str) -> AppResult<String> {
        let response = self
            .llm
            .complete(&LlmRequest::new(prompt, self.model.as_str()))
            .await?;
        Ok(response.content)
    }

    /// `network.explain`: explain a topic to an audience.
    pub async fn explain(&self, topic: &str, audience: &str) -> AppResult<String> {
        let prompt = self
            .prompts
            .get("network.explain")?
            .prompt_template()
            .format(&vars([("topic", topic), ("audience", audience)]))?;
        self.basic_prompt(&prompt).await
    }

    /// `network.steps`: three troubleshooting steps for a protocol.
    pub async fn troubleshooting_steps(&self, protocol: &str) -> AppResult<String> {
        self.text_chain("network.steps")?
            .invoke(&vars([("protocol", protocol)]))
            .await
    }

    /// `network.qa`: answer in the voice of a senior network engineer.
    pub async fn ask_senior_engineer(&self, question: &str) -> AppResult<String> {
        self.chat_chain("network.qa")?
            .invoke(&vars([("question", question)]))
            .await
    }

    /// `network.describe`: few-shot description of a Cisco command.
    pub async fn describe_command(&self, command: &str) -> AppResult<String> {
        self.text_chain("network.describe")?
            .invoke(&vars([("input", command)]))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netassist_llm::ScriptedClient;

    fn assistant(client: Arc<ScriptedClient>) -> Assistant {
        Assistant::new(client, "llama3.2", PromptResolver::builtin())
    }

    #[tokio::test]
    async fn test_basic_prompt_sends_text_verbatim() {
        let client = Arc::new(ScriptedClient::new(["BGP is the routing protocol of the internet."]));
        let answer = assistant(client.clone())
            .basic_prompt("Explain what BGP is in two sentences.")
            .await
            .unwrap();
        assert_eq!(answer, "BGP is the routing protocol of the internet.");
        assert_eq!(client.requests()[0].text(), "Explain what BGP is in two sentences.");
    }

    #[tokio::test]
    async fn test_explain_formats_template() {
        let client = Arc::new(ScriptedClient::new(["OSPF floods link states."]));
        assistant(client.clone())
            .explain("OSPF routing protocol", "beginner network engineer")
            .await
            .unwrap();
        assert_eq!(
            client.requests()[0].text(),
            "Explain OSPF routing protocol to a beginner network engineer. Keep it under 100 words."
        );
    }

    #[tokio::test]
    async fn test_steps_and_describe_prompts() {
        let client = Arc::new(ScriptedClient::new(["steps", "description"]));
        let assistant = assistant(client.clone());

        assistant.troubleshooting_steps("BGP").await.unwrap();
        assistant.describe_command("show cdp neighbors").await.unwrap();

        let requests = client.requests();
        assert_eq!(
            requests[0].text(),
            "List 3 common troubleshooting steps for BGP issues. Be concise."
        );
        assert!(requests[1].text().contains("Command: show ip ospf neighbor\nDescription: Shows OSPF neighbor adjacencies"));
    }

    #[tokio::test]
    async fn test_senior_engineer_uses_system_message() {
        let client = Arc::new(ScriptedClient::new(["Use it when peers are not directly connected."]));
        assistant(client.clone())
            .ask_senior_engineer("When would you use eBGP multihop?")
            .await
            .unwrap();
        assert_eq!(
            client.requests()[0].text(),
            "System: You are a senior network engineer. Answer questions concisely and technically.\nHuman: When would you use eBGP multihop?"
        );
    }
}
