//! Scripted chat model for tests.

use super::{ChatModel, ModelTurn};
use crate::error::{LaerError, Result};
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestMessage, ChatCompletionTool,
    ChatCompletionToolType, FunctionCall,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays a fixed sequence of turns and records every prompt it receives.
pub struct ScriptedModel {
    turns: Mutex<VecDeque<ModelTurn>>,
    prompts: Mutex<Vec<String>>,
    tool_counts: Mutex<Vec<usize>>,
}

impl ScriptedModel {
    pub fn new(turns: Vec<ModelTurn>) -> Self {
        Self {
            turns: Mutex::new(turns.into()),
            prompts: Mutex::new(Vec::new()),
            tool_counts: Mutex::new(Vec::new()),
        }
    }

    /// Serialized message lists, one per completion call.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn last_prompt_text(&self) -> String {
        self.prompts().last().cloned().unwrap_or_default()
    }

    /// Number of tools offered on each call.
    pub fn tool_counts(&self) -> Vec<usize> {
        self.tool_counts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete(
        &self,
        messages: &[ChatCompletionRequestMessage],
        tools: &[ChatCompletionTool],
    ) -> Result<ModelTurn> {
        self.prompts
            .lock()
            .unwrap()
            .push(serde_json::to_string(messages)?);
        self.tool_counts.lock().unwrap().push(tools.len());

        self.turns
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LaerError::Agent("Scripted model ran out of turns".to_string()))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Build a tool call as the model would emit it.
pub fn tool_call(id: &str, name: &str, arguments: serde_json::Value) -> ChatCompletionMessageToolCall {
    ChatCompletionMessageToolCall {
        id: id.to_string(),
        r#type: ChatCompletionToolType::Function,
        function: FunctionCall {
            name: name.to_string(),
            arguments: arguments.to_string(),
        },
    }
}
