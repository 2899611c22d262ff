//! LLM-backed alternative explanations.

use super::{Explanation, ExplanationProvider};
use crate::agent::ChatModel;
use crate::config::Prompts;
use crate::error::{LaerError, Result};
use crate::models::ExplanationType;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

pub struct ModelExplainer {
    model: Arc<dyn ChatModel>,
    prompts: Prompts,
}

impl ModelExplainer {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            prompts: Prompts::default(),
        }
    }

    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }
}

fn format_attempts(previous_attempts: &[String]) -> String {
    if previous_attempts.is_empty() {
        return "(none)".to_string();
    }
    previous_attempts
        .iter()
        .map(|a| format!("- {}", a))
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl ExplanationProvider for ModelExplainer {
    async fn explain(
        &self,
        concept: &str,
        explanation_type: ExplanationType,
        previous_attempts: &[String],
    ) -> Result<Explanation> {
        let mut vars = HashMap::new();
        vars.insert("concept".to_string(), concept.to_string());
        vars.insert("explanation_type".to_string(), explanation_type.to_string());
        vars.insert(
            "previous_attempts".to_string(),
            format_attempts(previous_attempts),
        );

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(
                    self.prompts
                        .render_with_custom(&self.prompts.explanation.system, &vars),
                )
                .build()
                .map_err(|e| LaerError::tool("provide_alternative_explanation", e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(
                    self.prompts
                        .render_with_custom(&self.prompts.explanation.user, &vars),
                )
                .build()
                .map_err(|e| LaerError::tool("provide_alternative_explanation", e.to_string()))?
                .into(),
        ];

        let turn = self.model.complete(&messages, &[]).await?;
        let content = turn.content.unwrap_or_default();
        if content.trim().is_empty() {
            return Err(LaerError::tool(
                "provide_alternative_explanation",
                "Empty response from LLM",
            ));
        }

        Ok(Explanation {
            concept: concept.to_string(),
            explanation_type,
            content,
        })
    }
}
