//! Tool definitions and dispatch for the tutoring agent.

use crate::error::{LaerError, Result};
use crate::models::{Difficulty, ExplanationType};
use crate::tools::{generate_problems, update_progress, ExplanationProvider, KnowledgeAssessor};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Bounds on the number of practice problems the model may request.
const MIN_PROBLEM_COUNT: f64 = 1.0;
const MAX_PROBLEM_COUNT: f64 = 10.0;

/// Names of every tool the agent exposes, in definition order.
pub const TOOL_NAMES: [&str; 4] = [
    "assess_knowledge_gap",
    "generate_practice_problems",
    "provide_alternative_explanation",
    "update_learning_path",
];

/// Whether the model asked for a tool that exists.
pub fn is_known_tool(name: &str) -> bool {
    TOOL_NAMES.contains(&name)
}

/// Available tools for the agent, validated against their schemas.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    /// Assess a student's understanding and identify gaps.
    AssessKnowledgeGap {
        topic: String,
        student_response: String,
        learning_objective: String,
    },

    /// Generate practice problems.
    GeneratePracticeProblems {
        topic: String,
        difficulty: Difficulty,
        problem_type: String,
        count: u8,
    },

    /// Explain a concept in a different modality.
    ProvideAlternativeExplanation {
        concept: String,
        explanation_type: ExplanationType,
        previous_attempts: Vec<String>,
    },

    /// Record progress and next steps for a student.
    UpdateLearningPath {
        student_id: String,
        topic: String,
        mastery_level: f64,
        recommended_next_steps: Vec<String>,
    },
}

impl ToolCall {
    /// The tool name as exposed to the model.
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::AssessKnowledgeGap { .. } => "assess_knowledge_gap",
            ToolCall::GeneratePracticeProblems { .. } => "generate_practice_problems",
            ToolCall::ProvideAlternativeExplanation { .. } => "provide_alternative_explanation",
            ToolCall::UpdateLearningPath { .. } => "update_learning_path",
        }
    }
}

/// Tool execution context holding the external collaborators.
pub struct ToolContext {
    pub assessor: Arc<dyn KnowledgeAssessor>,
    pub explainer: Arc<dyn ExplanationProvider>,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(assessor: Arc<dyn KnowledgeAssessor>, explainer: Arc<dyn ExplanationProvider>) -> Self {
        Self {
            assessor,
            explainer,
        }
    }

    /// Execute a tool call and return its structured result.
    pub async fn execute(&self, tool: &ToolCall) -> Result<Value> {
        debug!("Executing tool {}", tool.name());
        let output = match tool {
            ToolCall::AssessKnowledgeGap {
                topic,
                student_response,
                learning_objective,
            } => {
                let assessment = self
                    .assessor
                    .assess_gap(topic, student_response, learning_objective)
                    .await?;
                serde_json::to_value(assessment)?
            }
            ToolCall::GeneratePracticeProblems {
                topic,
                difficulty,
                problem_type,
                count,
            } => serde_json::to_value(generate_problems(topic, *difficulty, problem_type, *count))?,
            ToolCall::ProvideAlternativeExplanation {
                concept,
                explanation_type,
                previous_attempts,
            } => {
                let explanation = self
                    .explainer
                    .explain(concept, *explanation_type, previous_attempts)
                    .await?;
                serde_json::to_value(explanation)?
            }
            ToolCall::UpdateLearningPath {
                student_id,
                topic,
                mastery_level,
                recommended_next_steps,
            } => serde_json::to_value(update_progress(
                student_id,
                topic,
                *mastery_level,
                recommended_next_steps,
            ))?,
        };
        Ok(output)
    }
}

/// Get OpenAI function/tool definitions for the agent.
pub fn tool_definitions() -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    vec![
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "assess_knowledge_gap".to_string(),
                description: Some(
                    "Assess student's understanding of a specific topic and identify knowledge gaps"
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "topic": { "type": "string" },
                        "studentResponse": { "type": "string" },
                        "learningObjective": { "type": "string" }
                    },
                    "required": ["topic", "studentResponse", "learningObjective"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "generate_practice_problems".to_string(),
                description: Some(
                    "Generate personalized practice problems based on student's needs".to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "topic": { "type": "string" },
                        "difficulty": {
                            "type": "string",
                            "enum": Difficulty::ALL
                        },
                        "problemType": { "type": "string" },
                        "count": {
                            "type": "integer",
                            "minimum": MIN_PROBLEM_COUNT,
                            "maximum": MAX_PROBLEM_COUNT
                        }
                    },
                    "required": ["topic", "difficulty", "problemType", "count"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "provide_alternative_explanation".to_string(),
                description: Some(
                    "Provide different types of explanations (visual, analogy, step-by-step)"
                        .to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "concept": { "type": "string" },
                        "explanationType": {
                            "type": "string",
                            "enum": ExplanationType::ALL
                        },
                        "previousAttempts": {
                            "type": "array",
                            "items": { "type": "string" }
                        }
                    },
                    "required": ["concept", "explanationType", "previousAttempts"]
                })),
                strict: None,
            },
        },
        ChatCompletionTool {
            r#type: ChatCompletionToolType::Function,
            function: FunctionObject {
                name: "update_learning_path".to_string(),
                description: Some(
                    "Update the student's learning path based on current progress".to_string(),
                ),
                parameters: Some(serde_json::json!({
                    "type": "object",
                    "properties": {
                        "studentId": { "type": "string" },
                        "topic": { "type": "string" },
                        "masteryLevel": {
                            "type": "number",
                            "minimum": 0,
                            "maximum": 1
                        },
                        "recommendedNextSteps": {
                            "type": "array",
                            "items": { "type": "string" }
                        }
                    },
                    "required": ["studentId", "topic", "masteryLevel", "recommendedNextSteps"]
                })),
                strict: None,
            },
        },
    ]
}

fn required_str(args: &Value, key: &str) -> Result<String> {
    args[key]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| LaerError::InvalidInput(format!("Missing '{}' argument", key)))
}

fn required_str_list(args: &Value, key: &str) -> Result<Vec<String>> {
    let items = args[key]
        .as_array()
        .ok_or_else(|| LaerError::InvalidInput(format!("Missing '{}' argument", key)))?;

    items
        .iter()
        .map(|v| {
            v.as_str().map(str::to_string).ok_or_else(|| {
                LaerError::InvalidInput(format!("'{}' must contain only strings", key))
            })
        })
        .collect()
}

/// Parse and validate a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: Value = serde_json::from_str(arguments)
        .map_err(|e| LaerError::Agent(format!("Invalid tool arguments: {}", e)))?;

    match name {
        "assess_knowledge_gap" => Ok(ToolCall::AssessKnowledgeGap {
            topic: required_str(&args, "topic")?,
            student_response: required_str(&args, "studentResponse")?,
            learning_objective: required_str(&args, "learningObjective")?,
        }),
        "generate_practice_problems" => {
            let difficulty = required_str(&args, "difficulty")?
                .parse::<Difficulty>()
                .map_err(LaerError::InvalidInput)?;
            let count = args["count"]
                .as_f64()
                .ok_or_else(|| LaerError::InvalidInput("Missing 'count' argument".to_string()))?;
            if !(MIN_PROBLEM_COUNT..=MAX_PROBLEM_COUNT).contains(&count) {
                return Err(LaerError::InvalidInput(format!(
                    "'count' must be between {} and {}, got {}",
                    MIN_PROBLEM_COUNT, MAX_PROBLEM_COUNT, count
                )));
            }
            Ok(ToolCall::GeneratePracticeProblems {
                topic: required_str(&args, "topic")?,
                difficulty,
                problem_type: required_str(&args, "problemType")?,
                count: count.round() as u8,
            })
        }
        "provide_alternative_explanation" => {
            let explanation_type = required_str(&args, "explanationType")?
                .parse::<ExplanationType>()
                .map_err(LaerError::InvalidInput)?;
            Ok(ToolCall::ProvideAlternativeExplanation {
                concept: required_str(&args, "concept")?,
                explanation_type,
                previous_attempts: required_str_list(&args, "previousAttempts")?,
            })
        }
        "update_learning_path" => {
            let mastery_level = args["masteryLevel"].as_f64().ok_or_else(|| {
                LaerError::InvalidInput("Missing 'masteryLevel' argument".to_string())
            })?;
            if !(0.0..=1.0).contains(&mastery_level) {
                return Err(LaerError::InvalidInput(format!(
                    "'masteryLevel' must be between 0 and 1, got {}",
                    mastery_level
                )));
            }
            Ok(ToolCall::UpdateLearningPath {
                student_id: required_str(&args, "studentId")?,
                topic: required_str(&args, "topic")?,
                mastery_level,
                recommended_next_steps: required_str_list(&args, "recommendedNextSteps")?,
            })
        }
        _ => Err(LaerError::Agent(format!("Unknown tool: {}", name))),
    }
}
