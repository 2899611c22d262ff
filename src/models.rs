//! Shared data model for tutoring sessions.
//!
//! These types form the JSON contract between the chat client and the
//! tutoring server, so every field is serialized in camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
            Role::System => write!(f, "system"),
        }
    }
}

/// A single entry in a session's conversation log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Message {
    /// Create a message stamped with the current time.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
            metadata: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Attach arbitrary metadata.
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Record of one tool invocation made by the agent during a query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentAction {
    /// Name of the tool that was called.
    #[serde(rename = "type")]
    pub action_type: String,
    pub input: serde_json::Value,
    pub output: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

/// Phase a learning session is in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Assessing,
    Explaining,
    Practicing,
    Reviewing,
}

/// A student's learning session.
///
/// Owned by an external store; nothing in this crate populates or persists it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LearningSession {
    pub id: String,
    pub student_id: String,
    pub topic: String,
    pub start_time: DateTime<Utc>,
    pub current_state: SessionState,
    pub knowledge_gaps: Vec<String>,
    /// Estimated proficiency in [0, 1]. Not validated here.
    pub mastery_level: f64,
}

/// Requested difficulty for generated practice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [&'static str; 3] = ["beginner", "intermediate", "advanced"];
}

impl std::str::FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(format!(
                "Unknown difficulty '{}' (expected one of: {})",
                s,
                Difficulty::ALL.join(", ")
            )),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "beginner"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced => write!(f, "advanced"),
        }
    }
}

/// Modality for an alternative explanation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ExplanationType {
    Visual,
    Analogy,
    StepByStep,
    RealWorld,
}

impl ExplanationType {
    pub const ALL: [&'static str; 4] = ["visual", "analogy", "step-by-step", "real-world"];
}

impl std::str::FromStr for ExplanationType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "visual" => Ok(ExplanationType::Visual),
            "analogy" => Ok(ExplanationType::Analogy),
            "step-by-step" => Ok(ExplanationType::StepByStep),
            "real-world" => Ok(ExplanationType::RealWorld),
            _ => Err(format!(
                "Unknown explanation type '{}' (expected one of: {})",
                s,
                ExplanationType::ALL.join(", ")
            )),
        }
    }
}

impl std::fmt::Display for ExplanationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExplanationType::Visual => write!(f, "visual"),
            ExplanationType::Analogy => write!(f, "analogy"),
            ExplanationType::StepByStep => write!(f, "step-by-step"),
            ExplanationType::RealWorld => write!(f, "real-world"),
        }
    }
}

/// A generated practice problem.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PracticeProblem {
    pub id: String,
    pub question: String,
    #[serde(rename = "type")]
    pub problem_type: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_by_step_guide: Option<bool>,
}
