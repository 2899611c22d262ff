//! HTTP API for the tutoring orchestrator.
//!
//! Exposes `POST /api/chat` for chat clients, plus health and tool listing.

use crate::agent::tool_definitions;
use crate::models::Message;
use crate::tutor::Tutor;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

/// Shared application state.
pub struct AppState {
    pub tutor: Tutor,
}

impl AppState {
    pub fn new(tutor: Tutor) -> Self {
        Self { tutor }
    }
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat))
        .route("/api/tools", get(list_tools))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// === Request/Response Types ===

/// Body of `POST /api/chat`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
    /// Messages preceding `message`, oldest first.
    #[serde(default)]
    pub history: Vec<Message>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct ToolInfo {
    name: String,
    description: Option<String>,
    parameters: Option<serde_json::Value>,
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn chat(State(state): State<Arc<AppState>>, Json(req): Json<ChatRequest>) -> impl IntoResponse {
    match state
        .tutor
        .process_query(&req.session_id, &req.message, &req.history)
        .await
    {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            error!("Chat request for session {} failed: {}", req.session_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

async fn list_tools() -> impl IntoResponse {
    let tools: Vec<ToolInfo> = tool_definitions()
        .into_iter()
        .map(|t| ToolInfo {
            name: t.function.name,
            description: t.function.description,
            parameters: t.function.parameters,
        })
        .collect();
    Json(tools)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::testing::{tool_call, ScriptedModel};
    use crate::agent::ModelTurn;
    use crate::config::{Prompts, Settings};
    use crate::tutor::DefaultProfiler;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::util::ServiceExt;

    fn app(turns: Vec<ModelTurn>) -> Router {
        let tutor = Tutor::with_components(
            &Settings::default(),
            Prompts::default(),
            Arc::new(ScriptedModel::new(turns)),
            Arc::new(DefaultProfiler::default()),
        );
        router(Arc::new(AppState::new(tutor)))
    }

    fn chat_request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Vec::new())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_chat_without_tools() {
        let response = app(vec![ModelTurn::text("Derivatives measure change.")])
            .oneshot(chat_request(serde_json::json!({
                "message": "What is a derivative?",
                "sessionId": "s1",
                "history": []
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["response"], "Derivatives measure change.");
        assert_eq!(body["agentActions"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_chat_reports_agent_actions() {
        let turns = vec![
            ModelTurn::tool_calls(vec![tool_call(
                "call_1",
                "generate_practice_problems",
                serde_json::json!({
                    "topic": "derivatives",
                    "difficulty": "intermediate",
                    "problemType": "computation",
                    "count": 2
                }),
            )]),
            ModelTurn::text("Work through these."),
        ];

        let response = app(turns)
            .oneshot(chat_request(serde_json::json!({
                "message": "Can I practice?",
                "sessionId": "s1",
                "history": [
                    { "role": "user", "content": "hi", "timestamp": "2026-02-01T09:00:00Z" }
                ]
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let actions = body["agentActions"].as_array().unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0]["type"], "generate_practice_problems");
        assert_eq!(actions[0]["output"]["problems"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_chat_failure_is_500() {
        let response = app(Vec::new())
            .oneshot(chat_request(serde_json::json!({
                "message": "hello",
                "sessionId": "s1"
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(json_body(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_list_tools() {
        let response = app(Vec::new())
            .oneshot(Request::builder().uri("/api/tools").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = json_body(response).await;
        assert_eq!(body.as_array().unwrap().len(), 4);
        assert_eq!(body[3]["name"], "update_learning_path");
    }
}
