//! Error types for Laer.

use thiserror::Error;

/// Library-level error type for Laer operations.
#[derive(Error, Debug)]
pub enum LaerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("Tool '{tool}' failed: {message}")]
    Tool { tool: String, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Chat client error: {0}")]
    Client(String),
}

impl LaerError {
    /// Build a tool failure for the named tool.
    pub fn tool(tool: &str, message: impl Into<String>) -> Self {
        LaerError::Tool {
            tool: tool.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for Laer operations.
pub type Result<T> = std::result::Result<T, LaerError>;
