//! Chat model abstraction used by the agent loop.

use crate::config::ModelSettings;
use crate::error::{LaerError, Result};
use crate::openai::create_client_with_timeout;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestMessage, ChatCompletionTool,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// One model turn: either final text, or a batch of tool calls to execute.
#[derive(Debug, Clone, Default)]
pub struct ModelTurn {
    pub content: Option<String>,
    pub tool_calls: Vec<ChatCompletionMessageToolCall>,
}

impl ModelTurn {
    /// A turn that ends the loop with a text answer.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_calls: Vec::new(),
        }
    }

    /// A turn requesting tool invocations.
    pub fn tool_calls(calls: Vec<ChatCompletionMessageToolCall>) -> Self {
        Self {
            content: None,
            tool_calls: calls,
        }
    }

    pub fn wants_tools(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// Trait for chat completion backends.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run a single completion over the conversation so far.
    async fn complete(
        &self,
        messages: &[ChatCompletionRequestMessage],
        tools: &[ChatCompletionTool],
    ) -> Result<ModelTurn>;

    /// Confirm the backend is reachable and the model exists.
    async fn verify(&self) -> Result<()> {
        Ok(())
    }

    /// Model identifier, for logging.
    fn name(&self) -> &str;
}

/// OpenAI chat completions backend.
pub struct OpenAIChatModel {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAIChatModel {
    /// Create a model handle from settings.
    pub fn from_settings(settings: &ModelSettings) -> Result<Self> {
        let client = create_client_with_timeout(Duration::from_secs(settings.timeout_secs))?;
        Ok(Self {
            client,
            model: settings.name.clone(),
            temperature: settings.temperature,
        })
    }
}

#[async_trait]
impl ChatModel for OpenAIChatModel {
    async fn complete(
        &self,
        messages: &[ChatCompletionRequestMessage],
        tools: &[ChatCompletionTool],
    ) -> Result<ModelTurn> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model)
            .messages(messages.to_vec())
            .temperature(self.temperature);
        if !tools.is_empty() {
            args.tools(tools.to_vec());
        }
        let request = args.build().map_err(|e| LaerError::Agent(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| LaerError::OpenAI(format!("Chat completion failed: {}", e)))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LaerError::Agent("No response from model".to_string()))?;

        let tool_calls = choice.message.tool_calls.unwrap_or_default();
        debug!(
            "Model {} returned {} tool call(s)",
            self.model,
            tool_calls.len()
        );

        Ok(ModelTurn {
            content: choice.message.content,
            tool_calls,
        })
    }

    async fn verify(&self) -> Result<()> {
        self.client
            .models()
            .retrieve(&self.model)
            .await
            .map_err(|e| LaerError::OpenAI(format!("Model '{}' unavailable: {}", self.model, e)))?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.model
    }
}
