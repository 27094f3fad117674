//! Error types for the CLI and the HTTP API

use abacus::core::CalcError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON rendering error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Calculation rejected by a precondition
    #[error("{0}")]
    Calc(#[from] CalcError),

    /// HTTP server failure
    #[error("Server error: {message}")]
    Server {
        /// Error message
        message: String,
    },
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a server error
    #[must_use]
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }
}

/// Errors returned by the dashboard API
#[derive(Debug, Error)]
pub enum ApiError {
    /// No session with the requested id
    #[error("Session not found")]
    SessionNotFound,

    /// Operation name not recognised
    #[error("{0}")]
    InvalidOperation(#[from] abacus::core::ParseOperationError),

    /// Request is missing a required parameter
    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),

    /// Body or query string axum could not extract
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Status chosen by the extractor
        status: StatusCode,
        /// Extractor message
        message: String,
    },

    /// CSV export failed
    #[error("Export failed: {0}")]
    Export(#[from] csv::Error),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::SessionNotFound => StatusCode::NOT_FOUND,
            Self::InvalidOperation(_) | Self::MissingParameter(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequest { status, .. } => *status,
            Self::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "dashboard request failed");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = CliError::config("bad config");
        assert!(err.to_string().contains("Configuration"));
        assert!(err.to_string().contains("bad config"));
    }

    #[test]
    fn test_invalid_argument_error() {
        let err = CliError::invalid_argument("bad arg");
        assert_eq!(err.to_string(), "Invalid argument: bad arg");
    }

    #[test]
    fn test_server_error() {
        let err = CliError::server("address in use");
        assert!(err.to_string().contains("Server error"));
    }

    #[test]
    fn test_calc_error_passes_message_through() {
        let err: CliError = CalcError::DivisionByZero.into();
        assert_eq!(err.to_string(), "Division by zero!");
    }

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(cli_err.to_string().contains("I/O"));
    }

    #[test]
    fn test_api_error_status() {
        assert_eq!(ApiError::SessionNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MissingParameter("degrees").status(),
            StatusCode::BAD_REQUEST
        );
        let parse = "cbrt".parse::<abacus::core::Operation>().unwrap_err();
        assert_eq!(
            ApiError::from(parse).to_string(),
            "Invalid operation: cbrt"
        );
    }
}
