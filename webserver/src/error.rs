//! WebServer-specific error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use pipeline::PipelineError;
use shared::{ErrorBody, SharedError};
use thiserror::Error;

const GENERIC_MESSAGE: &str = "Something went wrong while calculating pronouns.";

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("Marathon slug is required.")]
    MissingSlug,

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl WebServerError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// HTTP status reported to the caller
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebServerError::MissingSlug
            | WebServerError::SharedError(SharedError::InvalidSourceKind { .. }) => {
                StatusCode::BAD_REQUEST
            }
            WebServerError::Pipeline(error) => match error {
                PipelineError::NotFound { .. } => StatusCode::NOT_FOUND,
                PipelineError::MalformedSource { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                PipelineError::InvalidLocator { .. } | PipelineError::UnsupportedSource { .. } => {
                    StatusCode::BAD_REQUEST
                }
                PipelineError::Upstream { .. } => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed");
            GENERIC_MESSAGE.to_string()
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
            self.to_string()
        };

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

pub type WebServerResult<T> = Result<T, WebServerError>;
