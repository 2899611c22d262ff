//! Tutoring tool implementations.
//!
//! The agent loop dispatches into these. Gap assessment and alternative
//! explanations sit behind traits so any backend can be plugged in; problem
//! generation and progress updates are local.

mod assessor;
mod explainer;
mod problems;
mod progress;

pub use assessor::ModelAssessor;
pub use explainer::ModelExplainer;
pub use problems::{generate_problems, ProblemSet};
pub use progress::{update_progress, ProgressAck};

use crate::error::Result;
use crate::models::ExplanationType;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Outcome of assessing a student's answer against a learning objective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GapAssessment {
    pub topic: String,
    pub learning_objective: String,
    /// Short narrative of what the student does and does not understand.
    pub summary: String,
    #[serde(default)]
    pub knowledge_gaps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_mastery: Option<f64>,
}

/// An explanation of a concept in a particular modality.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub concept: String,
    pub explanation_type: ExplanationType,
    pub content: String,
}

/// Trait for knowledge-gap assessment backends.
#[async_trait]
pub trait KnowledgeAssessor: Send + Sync {
    async fn assess_gap(
        &self,
        topic: &str,
        student_response: &str,
        learning_objective: &str,
    ) -> Result<GapAssessment>;
}

/// Trait for alternative-explanation backends.
#[async_trait]
pub trait ExplanationProvider: Send + Sync {
    async fn explain(
        &self,
        concept: &str,
        explanation_type: ExplanationType,
        previous_attempts: &[String],
    ) -> Result<Explanation>;
}

/// Extract the outermost JSON object from an LLM reply.
///
/// Models often wrap JSON in prose or code fences.
pub(crate) fn extract_json_object(response: &str) -> &str {
    match (response.find('{'), response.rfind('}')) {
        (Some(start), Some(end)) if end > start => &response[start..=end],
        _ => response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_object_from_fenced_reply() {
        let reply = "Sure:\n```json\n{\"summary\": \"ok\"}\n```\nHope that helps.";
        assert_eq!(extract_json_object(reply), r#"{"summary": "ok"}"#);
    }

    #[test]
    fn test_extract_json_object_passthrough() {
        assert_eq!(extract_json_object("no json here"), "no json here");
    }
}
