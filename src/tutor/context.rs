//! Context building from conversation history.

use crate::error::Result;
use crate::models::Message;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Trait for learner analysis backends.
///
/// Implementations inspect the conversation for recurring difficulties
/// and for the explanation style that works best for this student.
#[async_trait]
pub trait LearnerProfiler: Send + Sync {
    async fn identify_patterns(&self, history: &[Message]) -> Result<Vec<String>>;

    async fn detect_learning_style(&self, history: &[Message]) -> Result<String>;
}

/// Profiler used when no analysis backend is configured.
///
/// Reports no patterns and a fixed learning style.
pub struct DefaultProfiler {
    learning_style: String,
}

impl DefaultProfiler {
    pub fn new(learning_style: &str) -> Self {
        Self {
            learning_style: learning_style.to_string(),
        }
    }
}

impl Default for DefaultProfiler {
    fn default() -> Self {
        Self::new("mixed")
    }
}

#[async_trait]
impl LearnerProfiler for DefaultProfiler {
    async fn identify_patterns(&self, _history: &[Message]) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    async fn detect_learning_style(&self, _history: &[Message]) -> Result<String> {
        Ok(self.learning_style.clone())
    }
}

/// What the agent knows about the session before answering.
#[derive(Debug, Clone, PartialEq)]
pub struct TutorContext {
    pub recent_interactions: Vec<Message>,
    pub identified_gaps: Vec<String>,
    pub preferred_learning_style: String,
}

impl TutorContext {
    /// Render the context as text for the agent prompt.
    pub fn format_for_prompt(&self, session_id: &str, now: DateTime<Utc>) -> String {
        let mut out = format!(
            "Session: {}\nTime: {}\nPreferred learning style: {}\n",
            session_id,
            now.to_rfc3339(),
            self.preferred_learning_style
        );

        if self.identified_gaps.is_empty() {
            out.push_str("Identified gaps: none\n");
        } else {
            out.push_str(&format!("Identified gaps: {}\n", self.identified_gaps.join(", ")));
        }

        if self.recent_interactions.is_empty() {
            out.push_str("Recent conversation: (none)");
        } else {
            out.push_str("Recent conversation:");
            for msg in &self.recent_interactions {
                out.push_str(&format!("\n[{}] {}", msg.role, msg.content));
            }
        }

        out
    }
}

/// Builds a [`TutorContext`] from the tail of the history.
pub struct ContextBuilder {
    profiler: Arc<dyn LearnerProfiler>,
    window: usize,
}

impl ContextBuilder {
    pub fn new(profiler: Arc<dyn LearnerProfiler>) -> Self {
        Self { profiler, window: 5 }
    }

    /// Set how many recent messages are kept.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub async fn build(&self, history: &[Message]) -> Result<TutorContext> {
        Ok(TutorContext {
            recent_interactions: recent(history, self.window).to_vec(),
            identified_gaps: self.profiler.identify_patterns(history).await?,
            preferred_learning_style: self.profiler.detect_learning_style(history).await?,
        })
    }
}

/// The last `window` messages, in original order.
pub fn recent(history: &[Message], window: usize) -> &[Message] {
    &history[history.len().saturating_sub(window)..]
}
