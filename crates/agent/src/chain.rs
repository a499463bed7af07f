//! Prompt → model → string chains.

use netassist_core::{AppResult, ChatMessage};
use netassist_llm::{ChatRequest, LlmClient, LlmRequest, LlmResponse};
use netassist_prompt::{
    ChatPromptTemplate, FewShotPromptTemplate, PromptDefinition, PromptTemplate, PromptVars,
};
use std::sync::Arc;

/// Extracts the generated text from a response, unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrOutputParser;

impl StrOutputParser {
    pub fn parse(&self, response: LlmResponse) -> String {
        response.content
    }
}

/// A prompt that renders to a single string.
#[derive(Debug, Clone, PartialEq)]
pub enum TextPrompt {
    Template(PromptTemplate),
    FewShot(FewShotPromptTemplate),
}

impl TextPrompt {
    pub fn format(&self, variables: &PromptVars) -> AppResult<String> {
        match self {
            TextPrompt::Template(template) => template.format(variables),
            TextPrompt::FewShot(template) => template.format(variables),
        }
    }
}

impl From<PromptTemplate> for TextPrompt {
    fn from(template: PromptTemplate) -> Self {
        TextPrompt::Template(template)
    }
}

impl From<FewShotPromptTemplate> for TextPrompt {
    fn from(template: FewShotPromptTemplate) -> Self {
        TextPrompt::FewShot(template)
    }
}

/// Text prompt sent as a single completion.
pub struct LlmChain {
    llm: Arc<dyn LlmClient>,
    model: String,
    prompt: TextPrompt,
    system: Option<String>,
    parser: StrOutputParser,
}

impl LlmChain {
    pub fn new(llm: Arc<dyn LlmClient>, model: impl Into<String>, prompt: impl Into<TextPrompt>) -> Self {
        Self {
            llm,
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            parser: StrOutputParser,
        }
    }

    /// Chain for a text or few-shot prompt definition; its `system`, if any,
    /// becomes the completion's system prompt.
    pub fn from_definition(
        llm: Arc<dyn LlmClient>,
        model: impl Into<String>,
        definition: &PromptDefinition,
    ) -> AppResult<Self> {
        let prompt = if definition.is_few_shot() {
            TextPrompt::FewShot(definition.few_shot_template()?)
        } else {
            TextPrompt::Template(definition.prompt_template())
        };

        let mut chain = Self::new(llm, model, prompt);
        chain.system = definition.system.clone();
        Ok(chain)
    }

    pub fn prompt(&self) -> &TextPrompt {
        &self.prompt
    }

    pub async fn invoke(&self, variables: &PromptVars) -> AppResult<String> {
        let text = self.prompt.format(variables)?;

        let mut request = LlmRequest::new(text, self.model.as_str());
        if let Some(system) = &self.system {
            request = request.with_system(system.as_str());
        }

        tracing::debug!(model = %self.model, "Invoking text chain");
        let response = self.llm.complete(&request).await?;
        Ok(self.parser.parse(response))
    }
}

/// Chat prompt sent as a message list.
pub struct ChatChain {
    llm: Arc<dyn LlmClient>,
    model: String,
    prompt: ChatPromptTemplate,
    parser: StrOutputParser,
}

impl ChatChain {
    pub fn new(llm: Arc<dyn LlmClient>, model: impl Into<String>, prompt: ChatPromptTemplate) -> Self {
        Self {
            llm,
            model: model.into(),
            prompt,
            parser: StrOutputParser,
        }
    }

    pub fn from_definition(
        llm: Arc<dyn LlmClient>,
        model: impl Into<String>,
        definition: &PromptDefinition,
    ) -> Self {
        Self::new(llm, model, definition.chat_template())
    }

    pub fn prompt(&self) -> &ChatPromptTemplate {
        &self.prompt
    }

    pub async fn invoke(&self, variables: &PromptVars) -> AppResult<String> {
        self.invoke_with_history(variables, &[]).await
    }

    /// Render with named message histories for the template's placeholders.
    pub async fn invoke_with_history(
        &self,
        variables: &PromptVars,
        histories: &[(&str, &[ChatMessage])],
    ) -> AppResult<String> {
        let messages = self.prompt.format_with_history(variables, histories)?;

        tracing::debug!(model = %self.model, messages = messages.len(), "Invoking chat chain");
        let response = self
            .llm
            .chat(&ChatRequest::new(self.model.as_str(), messages))
            .await?;
        Ok(self.parser.parse(response))
    }
}
