//! Typed error handling for the lead-capture site
//!
//! # Error Categories
//!
//! - [`SiteError`]: what a request handler can fail with, mapped to an HTTP
//!   status and a `{code, message, details}` body
//! - [`TransportError`]: a submission could not be dispatched
//! - [`ConfigError`]: site configuration is unusable
//!
//! # Example
//!
//! ```rust,ignore
//! match controller.submit().await {
//!     SubmitResult::Invalid(errors) => Err(SiteError::Validation(errors)),
//!     SubmitResult::Submitted(Outcome::TransportFailed) => Err(SiteError::SubmissionFailed),
//!     _ => Ok(StatusCode::ACCEPTED),
//! }
//! ```

use crate::core::validation::FieldErrors;
use axum::Json;
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type surfaced by site handlers
#[derive(Debug)]
pub enum SiteError {
    /// One or more form fields failed validation
    Validation(FieldErrors),

    /// The lead could not be dispatched to its endpoint
    SubmissionFailed,

    /// A URL named a role that does not exist
    UnknownRole(String),

    /// The request body could not be read
    BadRequest(String),

    /// A page template failed to render
    Render(String),

    /// Configuration errors
    Config(ConfigError),
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteError::Validation(errors) => {
                write!(f, "{} field(s) failed validation", errors.len())
            }
            SiteError::SubmissionFailed => write!(f, "Failed to submit form. Please try again."),
            SiteError::UnknownRole(role) => write!(f, "Unknown role: {}", role),
            SiteError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            SiteError::Render(msg) => write!(f, "Failed to render page: {}", msg),
            SiteError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SiteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SiteError::Config(e) => Some(e),
            _ => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl SiteError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SiteError::Validation(_) => StatusCode::BAD_REQUEST,
            SiteError::SubmissionFailed => StatusCode::BAD_GATEWAY,
            SiteError::UnknownRole(_) => StatusCode::NOT_FOUND,
            SiteError::BadRequest(_) => StatusCode::BAD_REQUEST,
            SiteError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SiteError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            SiteError::Validation(_) => "VALIDATION_ERROR",
            SiteError::SubmissionFailed => "SUBMISSION_FAILED",
            SiteError::UnknownRole(_) => "UNKNOWN_ROLE",
            SiteError::BadRequest(_) => "BAD_REQUEST",
            SiteError::Render(_) => "RENDER_ERROR",
            SiteError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            SiteError::Validation(errors) => Some(serde_json::json!({ "fields": errors })),
            SiteError::UnknownRole(role) => Some(serde_json::json!({
                "role": role,
                "expected": ["buyer", "seller"]
            })),
            _ => None,
        }
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        if self.status_code().is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<ConfigError> for SiteError {
    fn from(err: ConfigError) -> Self {
        SiteError::Config(err)
    }
}

impl From<tera::Error> for SiteError {
    fn from(err: tera::Error) -> Self {
        SiteError::Render(err.to_string())
    }
}

impl From<JsonRejection> for SiteError {
    fn from(rejection: JsonRejection) -> Self {
        SiteError::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for SiteError {
    fn from(rejection: FormRejection) -> Self {
        SiteError::BadRequest(rejection.body_text())
    }
}

// =============================================================================
// Leaf errors
// =============================================================================

/// A submission that never left the process
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// DNS, connect, TLS or I/O failure
    #[error("Request to {url} could not be sent: {message}")]
    Unreachable { url: String, message: String },

    /// The configured timeout elapsed before the request completed
    #[error("Request to {url} timed out")]
    TimedOut { url: String },

    /// The request could not be built (bad URL, unencodable payload)
    #[error("Request could not be built: {0}")]
    InvalidRequest(String),
}

/// Unusable site configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {role} endpoint '{url}': {reason}")]
    InvalidEndpoint {
        role: String,
        url: String,
        reason: String,
    },

    #[error("Buyer and seller endpoints must differ (both are '{0}')")]
    SharedEndpoint(String),

    #[error("Invalid bind address '{0}'")]
    InvalidBind(String),

    #[error("Notification capacity must be greater than zero")]
    ZeroCapacity,
}
