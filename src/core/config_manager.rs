// src/core/config_manager.rs
//! Configuration: optional config.yaml, then environment, then command-line overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_LOG_FILE: &str = "/tmp/resume-screen.log";

const API_URL_ENV: &str = "RESUME_SCREEN_API_URL";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub client: ClientConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Append the backend's own error text to the generic analysis failure message.
    pub verbose_errors: bool,
    pub log_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            verbose_errors: false,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    local: ClientConfig,
    production: ClientConfig,
}

impl ConfigManager {
    /// Load configuration. An explicitly named file must exist; the default
    /// `config.yaml` is used only when present.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let mut manager = match config_path {
            Some(path) => Self::load_from_file(path, &environment)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load_from_file(&default_path, &environment)?
                } else {
                    Self {
                        environment,
                        client: ClientConfig::default(),
                    }
                }
            }
        };

        manager.apply_api_url(std::env::var(API_URL_ENV).ok());
        Ok(manager)
    }

    fn get_environment() -> String {
        std::env::var("RESUME_SCREEN_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(path: &Path, environment: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;

        let client = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        Ok(Self {
            environment: environment.to_string(),
            client,
        })
    }

    /// Replace the base URL when an override is present and non-blank.
    pub fn apply_api_url(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.client.api_base_url = url.trim().to_string();
        }
    }

    pub fn apply_log_file(&mut self, log_file: Option<PathBuf>) {
        if let Some(path) = log_file {
            self.client.log_file = path;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
local:
  api_base_url: "http://127.0.0.1:5000"
production:
  api_base_url: "https://screening.example.com"
  verbose_errors: true
  log_file: "/var/log/resume-screen.log"
"#;

    #[test]
    fn test_environment_sections() {
        let local = ConfigManager::from_yaml(YAML, "local").unwrap();
        assert_eq!(local.client.api_base_url, "http://127.0.0.1:5000");
        assert!(!local.client.verbose_errors);
        assert_eq!(local.client.log_file, PathBuf::from(DEFAULT_LOG_FILE));

        let prod = ConfigManager::from_yaml(YAML, "production").unwrap();
        assert_eq!(prod.client.api_base_url, "https://screening.example.com");
        assert!(prod.client.verbose_errors);
        assert_eq!(prod.environment, "production");
    }

    #[test]
    fn test_unknown_environment_falls_back_to_local() {
        let staging = ConfigManager::from_yaml(YAML, "staging").unwrap();
        assert_eq!(staging.client.api_base_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let manager = ConfigManager::from_yaml("{}", "local").unwrap();
        assert_eq!(manager.client, ClientConfig::default());
    }

    #[test]
    fn test_overrides() {
        let mut manager = ConfigManager::from_yaml(YAML, "local").unwrap();
        manager.apply_api_url(Some("   ".to_string()));
        assert_eq!(manager.client.api_base_url, "http://127.0.0.1:5000");
        manager.apply_api_url(Some(" http://backend:8080 ".to_string()));
        assert_eq!(manager.client.api_base_url, "http://backend:8080");
        manager.apply_log_file(Some(PathBuf::from("wizard.log")));
        assert_eq!(manager.client.log_file, PathBuf::from("wizard.log"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigManager::load(Some(&dir.path().join("nope.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
