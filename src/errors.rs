use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Unique error codes for client identification
#[derive(Debug, Clone, Copy)]
pub enum ErrorCode {
    // Validation errors (2xxx)
    ValidationFailed = 2001,

    // Upstream search API errors (5xxx)
    UpstreamError = 5001,
    UpstreamTransport = 5002,

    // Empty-input errors (6xxx)
    NoResults = 6001,
    NoConnectedStructure = 6002,
    MissingAbstracts = 6003,

    // Internal errors (9xxx)
    InternalError = 9001,
    ConfigurationError = 9002,
}

impl ErrorCode {
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }
}

/// Error types for the network-building pipeline.
///
/// The taxonomy keeps three failure families distinct: upstream failures
/// (non-200 from the search API, carrying status and body so they can never
/// be confused with a valid empty result), empty-input failures (no records,
/// no connected structure, no abstract data), and validation of user input.
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {0}")]
    ValidationError(String),

    // Upstream search API errors
    #[error("Search API returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Search API request failed: {0}")]
    UpstreamTransport(#[from] reqwest::Error),

    // Empty-input errors
    #[error("No papers found for query \"{query}\"")]
    NoResults { query: String },

    #[error("No connected structure found: {0}")]
    NoConnectedStructure(String),

    #[error("No abstract data in the result set; cannot build a similarity network")]
    MissingAbstracts,

    // Internal errors
    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::ValidationError(_) => ErrorCode::ValidationFailed,
            Self::Upstream { .. } => ErrorCode::UpstreamError,
            Self::UpstreamTransport(_) => ErrorCode::UpstreamTransport,
            Self::NoResults { .. } => ErrorCode::NoResults,
            Self::NoConnectedStructure(_) => ErrorCode::NoConnectedStructure,
            Self::MissingAbstracts => ErrorCode::MissingAbstracts,
            Self::InternalError(_) => ErrorCode::InternalError,
            Self::ConfigError(_) => ErrorCode::ConfigurationError,
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Self::UpstreamTransport(_) => StatusCode::BAD_GATEWAY,
            Self::NoResults { .. } => StatusCode::NOT_FOUND,
            Self::NoConnectedStructure(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::MissingAbstracts => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        // Log based on severity
        match &self {
            AppError::ValidationError(_)
            | AppError::NoResults { .. }
            | AppError::NoConnectedStructure(_)
            | AppError::MissingAbstracts => {
                tracing::debug!(error_code = error_code.as_u16(), %message, "Client error");
            }
            AppError::Upstream { .. } | AppError::UpstreamTransport(_) => {
                tracing::warn!(error_code = error_code.as_u16(), %message, "Upstream error");
            }
            _ => {
                tracing::error!(error_code = error_code.as_u16(), %message, error = ?self, "Server error");
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code.as_u16(),
                "status": status.as_u16(),
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_is_not_an_empty_result() {
        // A failed request and a successful empty result must stay distinguishable.
        let err = AppError::Upstream {
            status: 429,
            body: "rate limited".into(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_code().as_u16(), 5001);
        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn test_no_structure_error_code() {
        let err = AppError::NoConnectedStructure("largest component has 1 node".into());
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code().as_u16(), 6002);
    }

    #[test]
    fn test_validation_error() {
        let err = AppError::ValidationError("query cannot be empty".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
