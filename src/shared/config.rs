use std::path::{Path, PathBuf};
use std::time::Duration;

use schemars::JsonSchema;
use serde::Deserialize;

use crate::infra::github::{ClientConfig, DEFAULT_API_BASE_URL};
use crate::shared::dirs;
use crate::shared::env_var::EnvVars;

/// Top-level configuration for repo-scenarios.
#[derive(Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// GitHub access token. Overridden by REPO_SCENARIOS_GITHUB_TOKEN or GITHUB_TOKEN.
    #[serde(default)]
    pub github_token: Option<String>,

    /// REST API root (default: "https://api.github.com").
    #[serde(default = "default_api_base_url")]
    #[schemars(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    #[schemars(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attributes of repositories created by scenarios.
    #[serde(default)]
    pub repository: RepositoryDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            repository: RepositoryDefaults::default(),
        }
    }
}

// The token must never reach logs or error output.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field(
                "github_token",
                &self.github_token.as_ref().map(|_| "<redacted>"),
            )
            .field("api_base_url", &self.api_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("repository", &self.repository)
            .finish()
    }
}

/// Description, homepage and visibility used when a scenario creates a repository.
#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RepositoryDefaults {
    /// Repository description.
    #[serde(default = "default_description")]
    #[schemars(default = "default_description")]
    pub description: String,

    /// Repository homepage URL.
    #[serde(default = "default_homepage")]
    #[schemars(default = "default_homepage")]
    pub homepage: String,

    /// Whether created repositories are private (default: true).
    #[serde(default = "default_true")]
    #[schemars(default = "default_true")]
    pub private: bool,
}

impl Default for RepositoryDefaults {
    fn default() -> Self {
        Self {
            description: default_description(),
            homepage: default_homepage(),
            private: default_true(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_description() -> String {
    "Description of the newly created repository".to_string()
}

fn default_homepage() -> String {
    "https://www.linkedin.com/in/prima-wirawan/".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Transport settings derived from this configuration.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    /// Access token to authenticate with: environment first, then the file.
    pub fn resolve_token(&self, env: &EnvVars) -> Option<String> {
        env.github_token.clone().or_else(|| {
            self.github_token
                .as_ref()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
        })
    }

    fn validate(self, path: &Path) -> Result<Self, ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                message: "timeout_secs must be greater than 0".to_string(),
            });
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                message: format!("api_base_url is not an http(s) URL: {}", self.api_base_url),
            });
        }
        Ok(self)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read config file (permission error, etc.)
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parse error
    #[error("Invalid config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// Parsed but semantically invalid
    #[error("Invalid config file {path}: {message}")]
    Invalid { path: PathBuf, message: String },
}

/// Load configuration.
///
/// An explicit path must exist. Without one, searches
/// ~/.config/repo-scenarios/config.ya?ml and falls back to Config::default().
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        return parse_config(&content, path);
    }

    let Some(dir) = dirs::app_config_dir() else {
        return Ok(Config::default());
    };
    load_config_from_dir(&dir)
}

/// Load configuration from a specific directory.
/// Searches for config.yaml, then config.yml in the given directory.
/// Returns Config::default() if neither file exists.
pub fn load_config_from_dir(dir: &Path) -> anyhow::Result<Config> {
    for path in dirs::config_file_candidates(dir) {
        match std::fs::read_to_string(&path) {
            Ok(content) => return parse_config(&content, &path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(ConfigError::ReadError { path, source: e }.into()),
        }
    }

    Ok(Config::default())
}

/// Parse YAML content into Config.
fn parse_config(content: &str, path: &Path) -> anyhow::Result<Config> {
    let config: Config = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(config.validate(path)?)
}

/// Generate JSON Schema for the Config struct.
pub fn generate_schema() -> schemars::Schema {
    schemars::schema_for!(Config)
}
