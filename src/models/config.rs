use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the Jira base URL
pub const ENV_JIRA_URL: &str = "JIRA_URL";
/// Environment variable holding the Jira API token
pub const ENV_JIRA_API_TOKEN: &str = "JIRA_API_TOKEN";
/// Environment variable holding the Jira account email
pub const ENV_JIRA_EMAIL: &str = "JIRA_EMAIL";

/// Configuration loaded from jiradocs.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ollama: OllamaConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

/// Ollama API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Ollama API URL
    #[serde(default = "default_ollama_url")]
    pub url: String,
    /// Model name to use
    #[serde(default = "default_model")]
    pub model: String,
    /// Timeout in seconds for API requests
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: default_ollama_url(),
            model: default_model(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "deepseek-r1:7b".to_string()
}

fn default_timeout() -> u64 {
    300
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory PDF reports are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Config {
    /// Load config from a TOML file
    pub fn load_from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
        toml::from_str(&contents).map_err(|e| ConfigError::ParseError(path.clone(), e))
    }

    /// Try to load config from jiradocs.toml in the given directory
    pub fn load_from_dir(dir: &PathBuf) -> Result<Self, ConfigError> {
        let config_path = dir.join("jiradocs.toml");
        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Merge CLI overrides into the config
    pub fn with_overrides(
        mut self,
        model: Option<String>,
        url: Option<String>,
        timeout: Option<u64>,
        output_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(m) = model {
            self.ollama.model = m;
        }
        if let Some(u) = url {
            self.ollama.url = u;
        }
        if let Some(t) = timeout {
            self.ollama.timeout_seconds = t;
        }
        if let Some(dir) = output_dir {
            self.report.output_dir = dir;
        }
        self
    }
}

/// Jira connection credentials, read from the environment
#[derive(Debug, Clone)]
pub struct JiraConfig {
    /// Base URL of the Jira instance, without a trailing slash
    pub base_url: String,
    /// Account email used for basic auth
    pub email: String,
    /// API token paired with the email
    pub api_token: String,
}

impl JiraConfig {
    /// Read credentials from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through the given variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = required_var(&lookup, ENV_JIRA_URL)?;
        let api_token = required_var(&lookup, ENV_JIRA_API_TOKEN)?;
        let email = required_var(&lookup, ENV_JIRA_EMAIL)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            email,
            api_token,
        })
    }
}

fn required_var<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::MissingEnvVar(name)),
    }
}

/// Reject blank project keys before any request is made
pub fn validate_project_key(key: &str) -> Result<(), ConfigError> {
    if key.trim().is_empty() {
        Err(ConfigError::EmptyProjectKey)
    } else {
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("Project key cannot be empty")]
    EmptyProjectKey,
    #[error("Failed to read config file {0}: {1}")]
    ReadError(PathBuf, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(PathBuf, toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ollama.url, "http://localhost:11434");
        assert_eq!(config.ollama.model, "deepseek-r1:7b");
        assert_eq!(config.ollama.timeout_seconds, 300);
        assert_eq!(config.report.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_config_with_overrides() {
        let config = Config::default().with_overrides(
            Some("llama3".to_string()),
            Some("http://remote:11434".to_string()),
            Some(600),
            Some(PathBuf::from("reports")),
        );
        assert_eq!(config.ollama.model, "llama3");
        assert_eq!(config.ollama.url, "http://remote:11434");
        assert_eq!(config.ollama.timeout_seconds, 600);
        assert_eq!(config.report.output_dir, PathBuf::from("reports"));
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
[ollama]
url = "http://custom:8080"
model = "codellama"
timeout_seconds = 120

[report]
output_dir = "docs/generated"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ollama.url, "http://custom:8080");
        assert_eq!(config.ollama.model, "codellama");
        assert_eq!(config.ollama.timeout_seconds, 120);
        assert_eq!(config.report.output_dir, PathBuf::from("docs/generated"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[ollama]
model = "mistral"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ollama.model, "mistral");
        assert_eq!(config.ollama.url, "http://localhost:11434"); // default
        assert_eq!(config.report.output_dir, PathBuf::from("output")); // default
    }

    #[test]
    fn test_jira_config_from_lookup() {
        let config = JiraConfig::from_lookup(|name| match name {
            ENV_JIRA_URL => Some("https://example.atlassian.net/".to_string()),
            ENV_JIRA_API_TOKEN => Some("token123".to_string()),
            ENV_JIRA_EMAIL => Some("dev@example.com".to_string()),
            _ => None,
        })
        .unwrap();
        // trailing slash stripped so endpoint paths can be appended
        assert_eq!(config.base_url, "https://example.atlassian.net");
        assert_eq!(config.api_token, "token123");
        assert_eq!(config.email, "dev@example.com");
    }

    #[test]
    fn test_jira_config_missing_var() {
        let result = JiraConfig::from_lookup(|name| match name {
            ENV_JIRA_URL => Some("https://example.atlassian.net".to_string()),
            _ => None,
        });
        match result {
            Err(ConfigError::MissingEnvVar(name)) => assert_eq!(name, ENV_JIRA_API_TOKEN),
            other => panic!("Expected MissingEnvVar, got {:?}", other),
        }
    }

    #[test]
    fn test_jira_config_blank_var_is_missing() {
        let result = JiraConfig::from_lookup(|name| match name {
            ENV_JIRA_URL => Some("https://example.atlassian.net".to_string()),
            ENV_JIRA_API_TOKEN => Some("   ".to_string()),
            ENV_JIRA_EMAIL => Some("dev@example.com".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
    }

    #[test]
    fn test_validate_project_key() {
        assert!(validate_project_key("DEMO").is_ok());
        assert!(validate_project_key("").is_err());
        assert!(validate_project_key("   ").is_err());
    }
}
