//! Error types for the server.

use axum::{extract::rejection::JsonRejection, response::IntoResponse};

/// A convienent wrapper over `Result`, specifically catering to a server error.
pub type ServerResult<T> = Result<T, ServerError>;

/// A kitchen-sink error type for the server.
#[derive(Debug, thiserror::Error)]
#[allow(
    clippy::missing_docs_in_private_items,
    reason = "Error type is self explanatory"
)]
pub enum ServerError {
    // Generic
    #[error("Not found")]
    NotFound,
    #[error("Internal server error: {0}")]
    Internal(String),

    // Input validation
    #[error("Text must not be empty")]
    TextEmpty,
    #[error("Text is too long (maximum {max} characters)")]
    TextTooLong { max: usize },

    // Configuration
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),
    #[error("Invalid environment variable: {0}: {1}, failed due to: {2}")]
    InvalidEnvVar(&'static str, String, String),

    // Wrapped errors
    #[error(transparent)]
    Calculation(#[from] numerology::NumerologyError),
    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),
    #[error(transparent)]
    TemplateError(#[from] handlebars::TemplateError),
    #[error(transparent)]
    RenderError(#[from] handlebars::RenderError),
    #[error(transparent)]
    TokioIoError(#[from] tokio::io::Error),
}

/// Body of every error response, `{"Message": "..."}`.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct ErrorResponse {
    /// Human readable description of what went wrong.
    message: String,
}

impl ServerError {
    /// Get the name of a variant as a string, used for snapshots. Only used for testing.
    /// Should match name of the enum variant exactly, otherwise it's a bug.
    #[cfg(test)]
    const fn to_name(&self) -> &'static str {
        match &self {
            Self::NotFound => "NotFound",
            Self::Internal(_) => "Internal",
            Self::TextEmpty => "TextEmpty",
            Self::TextTooLong { .. } => "TextTooLong",
            Self::MissingEnvVar(_) => "MissingEnvVar",
            Self::InvalidEnvVar(..) => "InvalidEnvVar",
            Self::Calculation(_) => "Calculation",
            Self::JsonRejection(_) => "JsonRejection",
            Self::TemplateError(_) => "TemplateError",
            Self::RenderError(_) => "RenderError",
            Self::TokioIoError(_) => "TokioIoError",
        }
    }

    /// Get the appropriate [`axum::http::StatusCode`] to be returned to the user based on the error
    /// variant.
    const fn status_code(&self) -> axum::http::StatusCode {
        match self {
            Self::NotFound => axum::http::StatusCode::NOT_FOUND,
            Self::TextEmpty
            | Self::TextTooLong { .. }
            | Self::Calculation(_)
            | Self::JsonRejection(_) => axum::http::StatusCode::BAD_REQUEST,
            Self::Internal(_)
            | Self::MissingEnvVar(_)
            | Self::InvalidEnvVar(..)
            | Self::TemplateError(_)
            | Self::RenderError(_)
            | Self::TokioIoError(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();
        let message = if status_code.is_server_error() {
            tracing::error!(error = ?self, "Internal server error");
            "Internal server error".to_string()
        } else if status_code == axum::http::StatusCode::BAD_REQUEST {
            tracing::debug!(error = ?self, "Bad request");
            self.to_string()
        } else {
            tracing::debug!(error = ?self, "Client error");
            self.to_string()
        };

        (status_code, axum::Json(ErrorResponse { message })).into_response()
    }
}
