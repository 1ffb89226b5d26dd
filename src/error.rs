// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::database::StoreError;

pub const HOSTNAME_REQUIRED: &str = "Bad request. \"Hostname\" is required.";
pub const CONTAINERS_EMPTY: &str = "containers are empty";
pub const CONTAINER_NOT_FOUND: &str = "container not found";
pub const UNSUPPORTED_MEDIA_TYPE: &str = "Unsupported Media Type: request body must be JSON";

/// HTTP API error with appropriate status codes and client-facing messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 405 Method Not Allowed
    MethodNotAllowed { method: String, path: String },

    // 415 Unsupported Media Type
    UnsupportedMediaType(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> String {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::UnsupportedMediaType(msg)
            | ApiError::InternalServerError(msg) => msg.clone(),
            ApiError::MethodNotAllowed { method, path } => {
                format!("Method {} not allowed on {}", method, path)
            }
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn method_not_allowed(method: impl Into<String>, path: impl Into<String>) -> Self {
        ApiError::MethodNotAllowed {
            method: method.into(),
            path: path.into(),
        }
    }

    pub fn unsupported_media_type() -> Self {
        ApiError::UnsupportedMediaType(UNSUPPORTED_MEDIA_TYPE.to_string())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingHostname => ApiError::bad_request(HOSTNAME_REQUIRED),
            StoreError::Empty => ApiError::bad_request(CONTAINERS_EMPTY),
            StoreError::NotFound(_) => ApiError::not_found(CONTAINER_NOT_FOUND),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingHeader
            | AuthError::InvalidToken
            | AuthError::InvalidCredentials => ApiError::unauthorized(err.to_string()),
            AuthError::Forbidden => ApiError::forbidden(err.to_string()),
            AuthError::Signing(msg) => {
                // Never expose key or encoder details to clients
                tracing::error!("token signing failed: {}", msg);
                ApiError::internal_server_error("Internal server error")
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
