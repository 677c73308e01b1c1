use std::path::PathBuf;
use thiserror::Error;

use crate::models::ConfigError;

/// Main error type for JiraDocs
#[derive(Error, Debug)]
pub enum JiraDocsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Jira error: {0}")]
    Jira(#[from] JiraError),

    #[error("Ollama error: {0}")]
    Ollama(#[from] OllamaError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to the Jira REST API
#[derive(Error, Debug)]
pub enum JiraError {
    #[error("Authentication rejected (HTTP {0}): check JIRA_EMAIL and JIRA_API_TOKEN")]
    AuthRejected(u16),

    #[error("HTTP error: {status} - {message}")]
    HttpError { status: u16, message: String },

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

impl From<reqwest::Error> for JiraError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            JiraError::Timeout(0)
        } else if err.is_connect() {
            JiraError::ConnectionFailed(err.to_string())
        } else if let Some(status) = err.status() {
            JiraError::HttpError {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            JiraError::RequestFailed(err.to_string())
        }
    }
}

/// Errors related to the Ollama API
#[derive(Error, Debug)]
pub enum OllamaError {
    #[error("Connection refused: {0}")]
    ConnectionRefused(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("HTTP error: {status} - {message}")]
    HttpError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

impl From<reqwest::Error> for OllamaError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OllamaError::Timeout(0)
        } else if err.is_connect() {
            OllamaError::ConnectionRefused(err.to_string())
        } else if let Some(status) = err.status() {
            OllamaError::HttpError {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            OllamaError::RequestFailed(err.to_string())
        }
    }
}

/// Errors while assembling or writing a PDF report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to create output directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to write report file {0}: {1}")]
    WriteError(PathBuf, std::io::Error),

    #[error("Failed to move report into place at {0}: {1}")]
    RenameError(PathBuf, std::io::Error),

    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

pub type Result<T> = std::result::Result<T, JiraDocsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_names_env_vars() {
        let error = JiraError::AuthRejected(401);
        let message = error.to_string();
        assert!(message.contains("401"));
        assert!(message.contains("JIRA_EMAIL"));
        assert!(message.contains("JIRA_API_TOKEN"));
    }

    #[test]
    fn test_http_error_display() {
        let error = OllamaError::HttpError {
            status: 500,
            message: "internal server error".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "HTTP error: 500 - internal server error"
        );
    }

    #[test]
    fn test_jira_error_wraps_into_main_error() {
        let error: JiraDocsError = JiraError::Timeout(30).into();
        assert!(error.to_string().contains("Jira error"));
        assert!(error.to_string().contains("30 seconds"));
    }

    #[test]
    fn test_report_error_wraps_into_main_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: JiraDocsError =
            ReportError::CreateDir(PathBuf::from("output"), io).into();
        assert!(error.to_string().contains("Report error"));
        assert!(error.to_string().contains("output"));
    }
}
