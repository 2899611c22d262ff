//! OpenAI client configuration with sensible defaults.

use crate::error::{LaerError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Default timeout for OpenAI API requests (5 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an OpenAI client with a custom timeout.
///
/// The API key is read from `OPENAI_API_KEY` by the underlying config.
pub fn create_client_with_timeout(timeout: Duration) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LaerError::Config(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Client::with_config(OpenAIConfig::default()).with_http_client(http_client))
}
