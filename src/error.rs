// HTTP API Error Types
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::auth::{AuthError, PasswordError};
use crate::database::DatabaseError;
use crate::middleware::response::Envelope;
use crate::validation::{FieldError, FieldErrors};

pub const DEFAULT_FAILURE_MESSAGE: &str = "Operation failed";
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in";

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError {
        message: String,
        field_errors: Vec<FieldError>,
    },
    InvalidJson(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::ValidationError { .. } => 400,
            ApiError::InvalidJson(_) => 400,
            ApiError::Unauthorized(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::InternalServerError(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError { message, .. } => message,
            ApiError::InvalidJson(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Conflict(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Envelope body; only validation failures carry data
    pub fn to_envelope(&self) -> Envelope<Vec<FieldError>> {
        match self {
            ApiError::ValidationError { message, field_errors } => {
                Envelope::failed(Some(field_errors.clone()), message.clone())
            }
            _ => Envelope::failed(None, self.message()),
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(message: impl Into<String>, field_errors: FieldErrors) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            field_errors: field_errors.into_vec(),
        }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            DatabaseError::Duplicate { collection, constraint } => {
                tracing::warn!("Duplicate write to '{}' ({})", collection, constraint);
                ApiError::conflict("Resource already exists")
            }
            DatabaseError::Timeout { operation, limit } => {
                tracing::error!("Store {} timed out after {:?}", operation, limit);
                ApiError::internal_server_error(DEFAULT_FAILURE_MESSAGE)
            }
            other => {
                // Don't expose driver errors to clients
                tracing::error!("Store error: {}", other);
                ApiError::internal_server_error(DEFAULT_FAILURE_MESSAGE)
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Invalid(_) | AuthError::MissingClaim => {
                tracing::warn!("Rejected token: {}", err);
                ApiError::unauthorized(LOGIN_REQUIRED_MESSAGE)
            }
            AuthError::InvalidSecret | AuthError::TokenGeneration(_) | AuthError::InvalidTtl(_) => {
                tracing::error!("Token service error: {}", err);
                ApiError::internal_server_error(DEFAULT_FAILURE_MESSAGE)
            }
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        tracing::error!("Credential error: {}", err);
        ApiError::internal_server_error(DEFAULT_FAILURE_MESSAGE)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ApiError::invalid_json(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        tracing::debug!("Responding {} {}: {}", status.as_u16(), self.error_code(), self.message());
        (status, Json(self.to_envelope())).into_response()
    }
}
