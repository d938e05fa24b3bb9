//! User settings and preferences
//!
//! Manages application settings stored in ~/.trinav/config.toml

use crate::config::Environment;
use crate::error::{ConfigError, ConfigResult};
use crate::nav::StalePolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Environment used when neither `--env` nor `TRINAV_ENV` is set
    #[serde(default)]
    pub default_environment: Environment,

    /// Per-request timeout for explorer API calls
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Handling of responses that arrive for a superseded selection
    #[serde(default)]
    pub stale_responses: StalePolicy,

    #[serde(default)]
    pub environments: Environments,
}

/// Base URLs per environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environments {
    #[serde(default = "default_development")]
    pub development: EnvironmentConfig,

    #[serde(default = "default_production")]
    pub production: EnvironmentConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub api_base_url: String,
}

fn default_request_timeout() -> u64 {
    30
}

fn default_development() -> EnvironmentConfig {
    EnvironmentConfig {
        api_base_url: "http://localhost:5000/api".to_string(),
    }
}

fn default_production() -> EnvironmentConfig {
    EnvironmentConfig {
        api_base_url: "https://your-backend-api-url.com/api".to_string(),
    }
}

impl Default for Environments {
    fn default() -> Self {
        Self {
            development: default_development(),
            production: default_production(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_environment: Environment::default(),
            request_timeout_secs: default_request_timeout(),
            stale_responses: StalePolicy::default(),
            environments: Environments::default(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let settings: Settings = toml::from_str(content)?;
        if settings.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(settings)
    }

    pub fn environment(&self, env: Environment) -> &EnvironmentConfig {
        match env {
            Environment::Development => &self.environments.development,
            Environment::Production => &self.environments.production,
        }
    }

    /// The base URL to talk to: `override_url` if given, else the environment's
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if the URL is not http(s)
    pub fn base_url(&self, env: Environment, override_url: Option<&str>) -> ConfigResult<String> {
        let url = override_url
            .unwrap_or(&self.environment(env).api_base_url)
            .trim()
            .trim_end_matches('/');
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "API base URL must start with http:// or https://: {}",
                url
            )));
        }
        Ok(url.to_string())
    }
}

/// Get the config directory path (~/.trinav/)
pub fn config_dir() -> ConfigResult<PathBuf> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".trinav"))
}

/// Load settings from `path`, or from ~/.trinav/config.toml when `None`.
/// A missing file yields the defaults.
pub fn load_settings(path: Option<&Path>) -> ConfigResult<Settings> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_dir()?.join("config.toml"),
    };
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(&path)
        .map_err(|e| ConfigError::NotFound(format!("{}: {}", path.display(), e)))?;
    Settings::from_toml(&content)
}
