//! Agent runner with tool calling loop.

use super::model::ChatModel;
use super::tools::{is_known_tool, parse_tool_call, tool_definitions, ToolContext};
use crate::error::{LaerError, Result};
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default cap on tool-calling rounds per run.
pub const DEFAULT_MAX_ITERATIONS: usize = 15;

/// Reply returned when a run uses up its tool-calling rounds.
pub const MAX_ITERATIONS_MESSAGE: &str = "Agent stopped due to max iterations.";

/// Agent that drives a chat model through the tutoring tools.
pub struct Agent {
    model: Arc<dyn ChatModel>,
    tools: ToolContext,
    max_iterations: usize,
    system_prompt: String,
}

impl Agent {
    /// Create a new agent with the given model, tools and system prompt.
    pub fn new(model: Arc<dyn ChatModel>, tools: ToolContext, system_prompt: &str) -> Self {
        Self {
            model,
            tools,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            system_prompt: system_prompt.to_string(),
        }
    }

    /// Set maximum iterations for the agent loop.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Run the agent with a user task.
    pub async fn run(&self, task: &str, context: Option<&str>) -> Result<AgentResponse> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system_prompt.clone())
                .build()
                .map_err(|e| LaerError::Agent(e.to_string()))?
                .into(),
        ];

        let user_message = match context {
            Some(ctx) => format!("Context:\n{}\n\nStudent: {}", ctx, task),
            None => task.to_string(),
        };

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_message)
                .build()
                .map_err(|e| LaerError::Agent(e.to_string()))?
                .into(),
        );

        let tools = tool_definitions();
        let mut iterations = 0;
        let mut tool_calls_made = Vec::new();

        while iterations < self.max_iterations {
            debug!("Agent iteration {}", iterations + 1);

            let turn = self.model.complete(&messages, &tools).await?;

            if !turn.wants_tools() {
                return Ok(AgentResponse {
                    content: turn.content.unwrap_or_default(),
                    tool_calls: tool_calls_made,
                    iterations,
                    stopped_early: false,
                });
            }

            let assistant_msg = ChatCompletionRequestAssistantMessageArgs::default()
                .tool_calls(turn.tool_calls.clone())
                .build()
                .map_err(|e| LaerError::Agent(e.to_string()))?;
            messages.push(assistant_msg.into());

            for tool_call in &turn.tool_calls {
                let record = self.execute_tool_call(tool_call).await?;

                let tool_msg = ChatCompletionRequestToolMessageArgs::default()
                    .tool_call_id(&tool_call.id)
                    .content(record.output_text())
                    .build()
                    .map_err(|e| LaerError::Agent(e.to_string()))?;
                messages.push(tool_msg.into());

                tool_calls_made.push(record);
            }

            iterations += 1;
        }

        warn!(
            "Agent stopped after {} tool rounds without a final answer",
            iterations
        );

        Ok(AgentResponse {
            content: MAX_ITERATIONS_MESSAGE.to_string(),
            tool_calls: tool_calls_made,
            iterations,
            stopped_early: true,
        })
    }

    /// Execute a single tool call and return a record of it.
    ///
    /// Unknown tool names are reported back to the model. Arguments that
    /// fail schema validation and failures inside a tool propagate.
    async fn execute_tool_call(&self, tool_call: &ChatCompletionMessageToolCall) -> Result<ToolCallRecord> {
        let name = &tool_call.function.name;
        let arguments = &tool_call.function.arguments;

        info!("Agent calling tool: {} with args: {}", name, arguments);

        let output = if is_known_tool(name) {
            let tool = parse_tool_call(name, arguments)?;
            self.tools.execute(&tool).await?
        } else {
            warn!("Model requested unknown tool: {}", name);
            Value::String(format!("{} is not a valid tool, try another one.", name))
        };

        Ok(ToolCallRecord {
            name: name.clone(),
            arguments: arguments.clone(),
            output,
            timestamp: Utc::now(),
        })
    }
}

/// Response from an agent run.
#[derive(Debug)]
pub struct AgentResponse {
    /// The final response content from the agent.
    pub content: String,
    /// Record of all tool calls made during execution, in order.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of tool-calling rounds used.
    pub iterations: usize,
    /// Set when the run hit the round limit instead of producing an answer.
    pub stopped_early: bool,
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// JSON arguments passed to the tool, as sent by the model.
    pub arguments: String,
    /// Result returned by the tool.
    pub output: Value,
    pub timestamp: DateTime<Utc>,
}

impl ToolCallRecord {
    /// Arguments as structured JSON, or the raw string if they did not parse.
    pub fn input(&self) -> Value {
        serde_json::from_str(&self.arguments).unwrap_or_else(|_| Value::String(self.arguments.clone()))
    }

    /// Output as sent back to the model.
    pub fn output_text(&self) -> String {
        match &self.output {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::testing::{tool_call, ScriptedModel};
    use crate::agent::ModelTurn;
    use crate::tools::{ModelAssessor, ModelExplainer};

    fn agent_with(model: Arc<ScriptedModel>) -> Agent {
        let tools = ToolContext::new(
            Arc::new(ModelAssessor::new(model.clone())),
            Arc::new(ModelExplainer::new(model.clone())),
        );
        Agent::new(model, tools, "You are a tutor.")
    }

    #[test]
    fn test_tool_call_record_display() {
        let record = ToolCallRecord {
            name: "update_learning_path".to_string(),
            arguments: r#"{"topic": "sets"}"#.to_string(),
            output: serde_json::json!({ "success": true }),
            timestamp: Utc::now(),
        };
        assert_eq!(format!("{}", record), r#"update_learning_path({"topic": "sets"})"#);
        assert_eq!(record.output_text(), r#"{"success":true}"#);
        assert_eq!(record.input()["topic"], "sets");
    }

    #[tokio::test]
    async fn test_direct_answer_without_tools() {
        let model = Arc::new(ScriptedModel::new(vec![ModelTurn::text("A derivative is a rate.")]));
        let agent = agent_with(model.clone());

        let response = agent.run("What is a derivative?", None).await.unwrap();

        assert_eq!(response.content, "A derivative is a rate.");
        assert!(response.tool_calls.is_empty());
        assert_eq!(response.iterations, 0);
        assert!(!response.stopped_early);
        assert_eq!(model.tool_counts(), vec![4]);
    }

    #[tokio::test]
    async fn test_tool_round_trip() {
        let model = Arc::new(ScriptedModel::new(vec![
            ModelTurn::tool_calls(vec![tool_call(
                "call_1",
                "generate_practice_problems",
                serde_json::json!({
                    "topic": "derivatives",
                    "difficulty": "beginner",
                    "problemType": "computation",
                    "count": 5
                }),
            )]),
            ModelTurn::text("Here are two problems to try."),
        ]));
        let agent = agent_with(model.clone());

        let response = agent.run("Give me practice", Some("history: none")).await.unwrap();

        assert_eq!(response.iterations, 1);
        assert_eq!(response.tool_calls.len(), 1);
        let record = &response.tool_calls[0];
        assert_eq!(record.name, "generate_practice_problems");
        assert_eq!(record.output["problems"].as_array().unwrap().len(), 2);

        // The second prompt carries the tool result back to the model.
        assert!(model.last_prompt_text().contains("call_1"));
        assert!(model.prompts()[0].contains("history: none"));
    }

    #[tokio::test]
    async fn test_invalid_arguments_propagate() {
        let model = Arc::new(ScriptedModel::new(vec![
            ModelTurn::tool_calls(vec![tool_call(
                "call_1",
                "update_learning_path",
                serde_json::json!({
                    "studentId": "s1",
                    "topic": "limits",
                    "masteryLevel": 3.0,
                    "recommendedNextSteps": []
                }),
            )]),
            ModelTurn::text("Let me try that again later."),
        ]));
        let agent = agent_with(model.clone());

        let err = agent.run("update me", None).await.unwrap_err();

        assert!(matches!(err, LaerError::InvalidInput(_)));
        assert!(err.to_string().contains("masteryLevel"));
        // No follow-up model call after the rejected arguments.
        assert_eq!(model.prompts().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_tool_reported_to_model() {
        let model = Arc::new(ScriptedModel::new(vec![
            ModelTurn::tool_calls(vec![tool_call("call_1", "search_web", serde_json::json!({}))]),
            ModelTurn::text("I'll answer directly instead."),
        ]));
        let agent = agent_with(model.clone());

        let response = agent.run("look it up", None).await.unwrap();

        assert_eq!(response.content, "I'll answer directly instead.");
        assert_eq!(response.tool_calls.len(), 1);
        assert_eq!(
            response.tool_calls[0].output_text(),
            "search_web is not a valid tool, try another one."
        );
        assert!(model.last_prompt_text().contains("not a valid tool"));
    }

    #[tokio::test]
    async fn test_collaborator_failure_propagates() {
        // Assessor call consumes a blank turn and fails.
        let model = Arc::new(ScriptedModel::new(vec![
            ModelTurn::tool_calls(vec![tool_call(
                "call_1",
                "assess_knowledge_gap",
                serde_json::json!({
                    "topic": "limits",
                    "studentResponse": "??",
                    "learningObjective": "epsilon-delta"
                }),
            )]),
            ModelTurn::text(""),
        ]));
        let agent = agent_with(model);

        let err = agent.run("assess me", None).await.unwrap_err();
        assert!(matches!(err, LaerError::Tool { .. }));
    }

    #[tokio::test]
    async fn test_iteration_limit() {
        let looping = || {
            ModelTurn::tool_calls(vec![tool_call(
                "call_x",
                "update_learning_path",
                serde_json::json!({
                    "studentId": "s1",
                    "topic": "t",
                    "masteryLevel": 0.5,
                    "recommendedNextSteps": []
                }),
            )])
        };
        let model = Arc::new(ScriptedModel::new(vec![looping(), looping(), looping()]));
        let agent = agent_with(model.clone()).with_max_iterations(2);

        let response = agent.run("loop forever", None).await.unwrap();

        assert!(response.stopped_early);
        assert_eq!(response.content, MAX_ITERATIONS_MESSAGE);
        assert_eq!(response.iterations, 2);
        assert_eq!(response.tool_calls.len(), 2);
        // The limit ends the run without another model call.
        assert_eq!(model.prompts().len(), 2);
    }

    #[tokio::test]
    async fn test_final_answer_does_not_use_a_round() {
        let model = Arc::new(ScriptedModel::new(vec![
            ModelTurn::tool_calls(vec![tool_call(
                "call_1",
                "update_learning_path",
                serde_json::json!({
                    "studentId": "s1",
                    "topic": "t",
                    "masteryLevel": 0.5,
                    "recommendedNextSteps": []
                }),
            )]),
            ModelTurn::text("Done."),
        ]));
        let agent = agent_with(model).with_max_iterations(2);

        let response = agent.run("update me", None).await.unwrap();

        assert_eq!(response.content, "Done.");
        assert_eq!(response.iterations, 1);
        assert!(!response.stopped_early);
    }
}
