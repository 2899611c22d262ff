//! LLM-backed knowledge gap assessment.

use super::{extract_json_object, GapAssessment, KnowledgeAssessor};
use crate::agent::ChatModel;
use crate::config::Prompts;
use crate::error::{LaerError, Result};
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Assesses understanding by asking the chat model for a structured verdict.
pub struct ModelAssessor {
    model: Arc<dyn ChatModel>,
    prompts: Prompts,
}

impl ModelAssessor {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            prompts: Prompts::default(),
        }
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    fn parse_verdict(response: &str) -> Option<LlmVerdict> {
        serde_json::from_str(extract_json_object(response)).ok()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LlmVerdict {
    summary: String,
    #[serde(default)]
    knowledge_gaps: Vec<String>,
    #[serde(default)]
    estimated_mastery: Option<f64>,
}

#[async_trait]
impl KnowledgeAssessor for ModelAssessor {
    async fn assess_gap(
        &self,
        topic: &str,
        student_response: &str,
        learning_objective: &str,
    ) -> Result<GapAssessment> {
        let mut vars = HashMap::new();
        vars.insert("topic".to_string(), topic.to_string());
        vars.insert("student_response".to_string(), student_response.to_string());
        vars.insert("learning_objective".to_string(), learning_objective.to_string());

        let system = self
            .prompts
            .render_with_custom(&self.prompts.assessment.system, &vars);
        let user = self
            .prompts
            .render_with_custom(&self.prompts.assessment.user, &vars);

        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system)
                .build()
                .map_err(|e| LaerError::tool("assess_knowledge_gap", e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user)
                .build()
                .map_err(|e| LaerError::tool("assess_knowledge_gap", e.to_string()))?
                .into(),
        ];

        let turn = self.model.complete(&messages, &[]).await?;
        let content = turn
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| LaerError::tool("assess_knowledge_gap", "Empty response from LLM"))?;

        debug!(
            "Assessment response: {}",
            content.chars().take(300).collect::<String>()
        );

        let assessment = match Self::parse_verdict(&content) {
            Some(verdict) => GapAssessment {
                topic: topic.to_string(),
                learning_objective: learning_objective.to_string(),
                summary: verdict.summary,
                knowledge_gaps: verdict.knowledge_gaps,
                estimated_mastery: verdict.estimated_mastery.map(|m| m.clamp(0.0, 1.0)),
            },
            None => {
                warn!("Assessment was not valid JSON, keeping raw text");
                GapAssessment {
                    topic: topic.to_string(),
                    learning_objective: learning_objective.to_string(),
                    summary: content,
                    knowledge_gaps: Vec::new(),
                    estimated_mastery: None,
                }
            }
        };

        Ok(assessment)
    }
}
