//! Chat client for a running tutoring server.
//!
//! Keeps the session's message log and turns each server reply into
//! system messages (one per agent action) followed by the assistant reply.

use crate::error::{LaerError, Result};
use crate::models::{AgentAction, Message};
use crate::server::ChatRequest;
use crate::tutor::TutorResponse;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

/// Prefix of the system message shown for each agent action.
pub const ACTION_PREFIX: &str = "🤖 Agent Action: ";

/// A single chat session against `POST /api/chat`.
///
/// `send_message` borrows the client mutably, so one session can only have
/// one request in flight.
pub struct ChatClient {
    http: reqwest::Client,
    chat_url: Url,
    session_id: String,
    messages: Vec<Message>,
}

impl ChatClient {
    /// Create a client for the server at `endpoint` (e.g. `http://127.0.0.1:3000`).
    pub fn new(endpoint: &str, session_id: &str) -> Result<Self> {
        Self::with_timeout(endpoint, session_id, Duration::from_secs(crate::openai::DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(endpoint: &str, session_id: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(endpoint)
            .map_err(|e| LaerError::Config(format!("Invalid endpoint '{}': {}", endpoint, e)))?;
        let chat_url = base
            .join("api/chat")
            .map_err(|e| LaerError::Config(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            chat_url,
            session_id: session_id.to_string(),
            messages: Vec::new(),
        })
    }

    /// Create a client with a freshly generated session id.
    pub fn with_new_session(endpoint: &str) -> Result<Self> {
        Self::new(endpoint, &uuid::Uuid::new_v4().to_string())
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The full conversation log, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Forget the conversation.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Send user input and return the messages appended from the reply.
    ///
    /// The user message is appended before the request. If the request fails
    /// the error is logged and returned, and the log keeps the user message.
    pub async fn send_message(&mut self, content: &str) -> Result<&[Message]> {
        let request = ChatRequest {
            message: content.to_string(),
            session_id: self.session_id.clone(),
            history: self.messages.clone(),
        };
        self.messages.push(Message::user(content));

        let reply = match self.post(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Error sending message: {}", e);
                return Err(e);
            }
        };

        let start = self.messages.len();
        for action in &reply.agent_actions {
            self.messages.push(action_message(action)?);
        }
        self.messages.push(Message::assistant(reply.response));

        Ok(&self.messages[start..])
    }

    async fn post(&self, request: &ChatRequest) -> Result<TutorResponse> {
        debug!(
            "POST {} ({} history messages)",
            self.chat_url,
            request.history.len()
        );

        let response = self.http.post(self.chat_url.clone()).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LaerError::Client(format!("Server returned {}: {}", status, body)));
        }

        Ok(response.json::<TutorResponse>().await?)
    }
}

/// System message announcing an agent action, with the action as metadata.
pub fn action_message(action: &AgentAction) -> Result<Message> {
    Ok(
        Message::system(format!("{}{}", ACTION_PREFIX, action.action_type))
            .with_metadata(serde_json::to_value(action)?),
    )
}
