//! Pre-flight checks before starting the tutor.
//!
//! Validates that required configuration is available before starting
//! operations that would otherwise fail on the first request.

use crate::error::{LaerError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Running the tutor (server or one-shot) requires an API key.
    Tutor,
    /// The chat client only talks to the server.
    Chat,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation) -> Result<()> {
    match operation {
        Operation::Tutor => check_api_key(),
        Operation::Chat => Ok(()),
    }
}

/// Check if OpenAI API key is configured.
pub fn check_api_key() -> Result<()> {
    match std::env::var("OPENAI_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(LaerError::Config(
            "OPENAI_API_KEY is empty. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
        Err(_) => Err(LaerError::Config(
            "OPENAI_API_KEY not set. Set it with: export OPENAI_API_KEY='sk-...'".to_string(),
        )),
    }
}
