use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the blink matcher
#[derive(Error, Debug)]
pub enum MatchError {
    /// Source record or catalog file does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Content is not valid structured text
    #[error("Failed to parse {origin}: {message}")]
    Parse { origin: String, message: String },

    /// No candidates exist for the requested tag
    #[error("No candidate data for tag: {0}")]
    NoData(String),

    /// Candidate at `index` lacks a field required for scoring
    #[error("Candidate #{index} is missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    /// Filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML configuration errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Candidate source errors
    #[error("Provider '{provider}' error: {message}")]
    Provider { provider: String, message: String },

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(String),
}

impl MatchError {
    pub(crate) fn parse(origin: impl Into<String>, message: impl ToString) -> Self {
        MatchError::Parse {
            origin: origin.into(),
            message: message.to_string(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, MatchError>;
