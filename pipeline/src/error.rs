//! Pipeline error types

use shared::{SharedError, SourceKind};
use thiserror::Error;

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Request-level failures; any of these aborts the whole calculation
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("Could not normalize {source_kind} data; {message}")]
    MalformedSource { source_kind: SourceKind, message: String },

    #[error("Invalid locator '{locator}': {reason}")]
    InvalidLocator { locator: String, reason: String },

    #[error("Unsupported source: {name}")]
    UnsupportedSource { name: String },

    #[error("Upstream request failed: {message}")]
    Upstream { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn malformed(source_kind: SourceKind, message: impl Into<String>) -> Self {
        Self::MalformedSource {
            source_kind,
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(error: reqwest::Error) -> Self {
        Self::upstream(error.to_string())
    }
}

/// Failure of a single external pronoun lookup; recovered per runner
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for LookupFailure {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Malformed(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}
