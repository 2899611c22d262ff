//! Doctor command - verify configuration and connectivity.

use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::path::Path;
use std::time::Duration;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("Laer Doctor");
    println!();
    println!("Checking configuration and connectivity...\n");

    let mut checks = Vec::new();

    println!("{}", style("API Configuration").bold());
    let api_check = check_openai_api_key(std::env::var("OPENAI_API_KEY").ok().as_deref());
    api_check.print();
    checks.push(api_check);
    Output::kv("Model", &settings.model.name);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file(config_path);
    config_check.print();
    checks.push(config_check);

    println!();

    println!("{}", style("Server").bold());
    let server_check = check_server(&settings.client.endpoint).await;
    server_check.print();
    checks.push(server_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Laer.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Laer is ready to use.");
    }

    Ok(())
}

/// Check the OpenAI API key value.
fn check_openai_api_key(key: Option<&str>) -> CheckResult {
    match key {
        Some(key) if key.starts_with("sk-") && key.chars().count() > 20 => {
            CheckResult::ok("OPENAI_API_KEY", &format!("configured ({})", mask_key(key)))
        }
        Some("") => CheckResult::error(
            "OPENAI_API_KEY",
            "empty",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
        Some(_) => CheckResult::warning(
            "OPENAI_API_KEY",
            "set but format looks unusual",
            "Expected format: sk-... (OpenAI API key)",
        ),
        None => CheckResult::error(
            "OPENAI_API_KEY",
            "not set",
            "Set with: export OPENAI_API_KEY='sk-...'",
        ),
    }
}

/// Keep the first 7 and last 4 characters of a key.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let head: String = chars.iter().take(7).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Check if config file exists.
fn check_config_file(config_path: &Path) -> CheckResult {
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning("Config file", "using defaults", "Create with: laer config edit")
    }
}

/// Check whether a tutoring server answers on the configured endpoint.
async fn check_server(endpoint: &str) -> CheckResult {
    let url = format!("{}/health", endpoint.trim_end_matches('/'));
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(3))
        .build()
    {
        Ok(c) => c,
        Err(e) => return CheckResult::error("Server", &format!("error: {}", e), "Check TLS setup"),
    };

    match client.get(&url).send().await {
        Ok(resp) if resp.status().is_success() => CheckResult::ok("Server", endpoint),
        Ok(resp) => CheckResult::warning(
            "Server",
            &format!("{} returned {}", endpoint, resp.status()),
            "Is another service running on this port?",
        ),
        Err(_) => CheckResult::warning(
            "Server",
            &format!("{} not reachable", endpoint),
            "Start one with: laer serve",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_result_ok() {
        let result = CheckResult::ok("test", "passed");
        assert_eq!(result.status, CheckStatus::Ok);
        assert!(result.hint.is_none());
    }

    #[test]
    fn test_api_key_checks() {
        assert_eq!(check_openai_api_key(None).status, CheckStatus::Error);
        assert_eq!(check_openai_api_key(Some("")).status, CheckStatus::Error);
        assert_eq!(check_openai_api_key(Some("abc")).status, CheckStatus::Warning);

        let ok = check_openai_api_key(Some("sk-proj-abcdefghijklmnopqrstuvwxyz"));
        assert_eq!(ok.status, CheckStatus::Ok);
        assert!(ok.message.contains("sk-proj...wxyz"));
    }

    #[test]
    fn test_mask_key_multibyte() {
        // Both cut points fall inside a multi-byte character.
        let ok = check_openai_api_key(Some("sk-proé-abcdefghijklmnop€€"));
        assert_eq!(ok.status, CheckStatus::Ok);
        assert!(ok.message.contains("sk-proé...op€€"));
    }

    #[test]
    fn test_config_file_check_uses_given_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("laer.toml");
        assert_eq!(check_config_file(&path).status, CheckStatus::Warning);

        std::fs::write(&path, "").unwrap();
        let found = check_config_file(&path);
        assert_eq!(found.status, CheckStatus::Ok);
        assert!(found.message.contains("laer.toml"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_warning() {
        let result = check_server("http://127.0.0.1:9").await;
        assert_eq!(result.status, CheckStatus::Warning);
    }
}
