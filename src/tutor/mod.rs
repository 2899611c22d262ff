//! Tutoring orchestrator.
//!
//! Turns a student query plus conversation history into a tutor reply by
//! running the tool-calling agent, and reports which tools the agent used.

mod context;

pub use context::{recent, ContextBuilder, DefaultProfiler, LearnerProfiler, TutorContext};

use crate::agent::{Agent, ChatModel, OpenAIChatModel, ToolCallRecord, ToolContext};
use crate::config::{Prompts, Settings};
use crate::error::Result;
use crate::models::{AgentAction, Message};
use crate::tools::{ModelAssessor, ModelExplainer};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};

/// Result of processing one student query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TutorResponse {
    pub response: String,
    pub agent_actions: Vec<AgentAction>,
    /// Recommended next steps produced by this turn. Nothing fills this yet.
    #[serde(default)]
    pub updated_learning_path: Vec<String>,
}

/// The tutoring orchestrator.
///
/// Built once, then shared read-only across requests.
pub struct Tutor {
    agent: Agent,
    context_builder: ContextBuilder,
}

impl Tutor {
    /// Build the orchestrator from settings.
    ///
    /// Creates the OpenAI model handle and, if configured, verifies the model
    /// before returning.
    pub async fn connect(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let model = OpenAIChatModel::from_settings(&settings.model)?;
        if settings.model.verify_on_startup {
            model.verify().await?;
            info!("Verified model {}", settings.model.name);
        }

        let profiler = Arc::new(DefaultProfiler::new(&settings.tutor.default_learning_style));
        Ok(Self::with_components(settings, prompts, Arc::new(model), profiler))
    }

    /// Build the orchestrator around an existing model and profiler.
    ///
    /// Gap assessment and explanations use the same model.
    pub fn with_components(
        settings: &Settings,
        prompts: Prompts,
        model: Arc<dyn ChatModel>,
        profiler: Arc<dyn LearnerProfiler>,
    ) -> Self {
        let tools = ToolContext::new(
            Arc::new(ModelAssessor::new(model.clone()).with_prompts(prompts.clone())),
            Arc::new(ModelExplainer::new(model.clone()).with_prompts(prompts.clone())),
        );

        let agent = Agent::new(model, tools, &prompts.tutor_system())
            .with_max_iterations(settings.model.max_iterations);
        let context_builder =
            ContextBuilder::new(profiler).with_window(settings.tutor.history_window);

        Self::new(agent, context_builder)
    }

    pub fn new(agent: Agent, context_builder: ContextBuilder) -> Self {
        Self {
            agent,
            context_builder,
        }
    }

    pub fn model_name(&self) -> &str {
        self.agent.model_name()
    }

    /// Answer a student query in the context of the session history.
    #[instrument(skip_all, fields(session_id = %session_id, history = history.len()))]
    pub async fn process_query(
        &self,
        session_id: &str,
        query: &str,
        history: &[Message],
    ) -> Result<TutorResponse> {
        let context = self.context_builder.build(history).await?;
        let context_text = context.format_for_prompt(session_id, Utc::now());

        let result = self.agent.run(query, Some(&context_text)).await?;

        info!(
            "Answered in {} iteration(s) with {} tool call(s)",
            result.iterations,
            result.tool_calls.len()
        );

        Ok(TutorResponse {
            response: result.content,
            agent_actions: result.tool_calls.iter().map(to_agent_action).collect(),
            updated_learning_path: Vec::new(),
        })
    }
}

fn to_agent_action(record: &ToolCallRecord) -> AgentAction {
    AgentAction {
        action_type: record.name.clone(),
        input: record.input(),
        output: record.output.clone(),
        timestamp: record.timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::testing::{tool_call, ScriptedModel};
    use crate::agent::{ModelTurn, DEFAULT_MAX_ITERATIONS, MAX_ITERATIONS_MESSAGE};
    use crate::models::Role;

    fn tutor_with(model: Arc<ScriptedModel>) -> Tutor {
        Tutor::with_components(
            &Settings::default(),
            Prompts::default(),
            model,
            Arc::new(DefaultProfiler::default()),
        )
    }

    #[tokio::test]
    async fn test_no_tools_empty_history() {
        let model = Arc::new(ScriptedModel::new(vec![ModelTurn::text(
            "A derivative measures instantaneous change.",
        )]));
        let tutor = tutor_with(model.clone());

        let response = tutor
            .process_query("s1", "What is a derivative?", &[])
            .await
            .unwrap();

        assert_eq!(response.response, "A derivative measures instantaneous change.");
        assert!(response.agent_actions.is_empty());
        assert!(response.updated_learning_path.is_empty());
        assert!(model.last_prompt_text().contains("Recent conversation: (none)"));
    }

    #[tokio::test]
    async fn test_context_uses_last_five_messages() {
        let model = Arc::new(ScriptedModel::new(vec![ModelTurn::text("ok")]));
        let tutor = tutor_with(model.clone());
        let history: Vec<Message> = (0..8)
            .map(|i| Message::new(Role::User, format!("turn-{}", i)))
            .collect();

        tutor.process_query("s1", "next", &history).await.unwrap();

        let prompt = model.last_prompt_text();
        assert!(!prompt.contains("turn-2"));
        let positions: Vec<usize> = (3..8)
            .map(|i| prompt.find(&format!("turn-{}", i)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_tool_calls_become_agent_actions() {
        let model = Arc::new(ScriptedModel::new(vec![
            ModelTurn::tool_calls(vec![
                tool_call(
                    "call_1",
                    "generate_practice_problems",
                    serde_json::json!({
                        "topic": "fractions",
                        "difficulty": "beginner",
                        "problemType": "arithmetic",
                        "count": 3
                    }),
                ),
                tool_call(
                    "call_2",
                    "update_learning_path",
                    serde_json::json!({
                        "studentId": "stu-7",
                        "topic": "fractions",
                        "masteryLevel": 0.4,
                        "recommendedNextSteps": ["equivalent fractions"]
                    }),
                ),
            ]),
            ModelTurn::text("Try these two problems."),
        ]));
        let tutor = tutor_with(model);

        let response = tutor
            .process_query("s1", "I'm stuck on fractions", &[])
            .await
            .unwrap();

        let types: Vec<&str> = response
            .agent_actions
            .iter()
            .map(|a| a.action_type.as_str())
            .collect();
        assert_eq!(types, vec!["generate_practice_problems", "update_learning_path"]);
        assert_eq!(response.agent_actions[0].input["count"], 3);
        assert_eq!(response.agent_actions[1].output["success"], true);
        assert!(response.updated_learning_path.is_empty());
    }

    #[tokio::test]
    async fn test_round_limit_returns_actions_taken() {
        let turns = (0..20)
            .map(|i| {
                ModelTurn::tool_calls(vec![tool_call(
                    &format!("call_{}", i),
                    "update_learning_path",
                    serde_json::json!({
                        "studentId": "stu-1",
                        "topic": "loops",
                        "masteryLevel": 0.5,
                        "recommendedNextSteps": []
                    }),
                )])
            })
            .collect();
        let model = Arc::new(ScriptedModel::new(turns));
        let tutor = tutor_with(model);

        let response = tutor.process_query("s1", "keep going", &[]).await.unwrap();

        assert_eq!(response.response, MAX_ITERATIONS_MESSAGE);
        assert_eq!(response.agent_actions.len(), DEFAULT_MAX_ITERATIONS);
        assert!(response
            .agent_actions
            .iter()
            .all(|a| a.action_type == "update_learning_path"));
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let model = Arc::new(ScriptedModel::new(Vec::new()));
        let tutor = tutor_with(model);

        assert!(tutor.process_query("s1", "hello", &[]).await.is_err());
    }

    #[test]
    fn test_response_wire_format() {
        let response = TutorResponse {
            response: "hi".to_string(),
            agent_actions: Vec::new(),
            updated_learning_path: Vec::new(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["agentActions"], serde_json::json!([]));
        assert_eq!(json["updatedLearningPath"], serde_json::json!([]));
    }
}
