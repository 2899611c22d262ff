//! Configuration settings for Laer.

use crate::agent::DEFAULT_MAX_ITERATIONS;
use crate::openai::DEFAULT_TIMEOUT_SECS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub model: ModelSettings,
    pub server: ServerSettings,
    pub client: ClientSettings,
    pub tutor: TutorSettings,
    pub prompts: PromptSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Chat model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Model used by the tutoring agent and its LLM-backed tools.
    pub name: String,
    pub temperature: f32,
    /// Maximum model calls per query before giving up.
    pub max_iterations: usize,
    /// Timeout for a single API request, in seconds.
    pub timeout_secs: u64,
    /// Check the model exists before accepting requests.
    pub verify_on_startup: bool,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            name: "gpt-4".to_string(),
            temperature: 0.3,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            verify_on_startup: true,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Chat client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Base URL of a running `laer serve`.
    pub endpoint: String,
    /// Request timeout, in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:3000".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Tutoring orchestrator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorSettings {
    /// Number of recent messages included in the agent context.
    pub history_window: usize,
    /// Learning style reported when no classifier is configured.
    pub default_learning_style: String,
}

impl Default for TutorSettings {
    fn default() -> Self {
        Self {
            history_window: 5,
            default_learning_style: "mixed".to_string(),
        }
    }
}

/// Prompt customization settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PromptSettings {
    /// Directory for custom prompts (overrides defaults).
    pub custom_dir: Option<String>,
    /// Custom variables available in all prompts as {{variable_name}}.
    pub variables: std::collections::HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// The config file in effect: an explicit `--config` path (with `~`
    /// expanded) or the default location.
    pub fn resolve_path(explicit: Option<&str>) -> PathBuf {
        match explicit {
            Some(path) => Self::expand_path(path),
            None => Self::default_config_path(),
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::LaerError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("laer")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Address the server binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
