//! Method-level dispatch responses shared by every registered route.

use axum::{
    extract::OriginalUri,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// The verbs a route answers, in the order they are advertised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowedMethods(&'static [&'static str]);

impl AllowedMethods {
    pub const CONTAINERS: Self = Self(&["GET", "POST", "HEAD", "OPTIONS"]);
    pub const CONTAINER: Self = Self(&["GET", "PUT", "DELETE", "HEAD", "OPTIONS"]);
    pub const LOGIN: Self = Self(&["POST", "OPTIONS"]);
    pub const READ_ONLY: Self = Self(&["GET", "HEAD", "OPTIONS"]);

    pub fn header_value(&self) -> String {
        self.0.join(", ")
    }
}

/// `OPTIONS` answer: 200, empty body, `Allow` listing the route's verbs
impl IntoResponse for AllowedMethods {
    fn into_response(self) -> Response {
        (StatusCode::OK, [(header::ALLOW, self.header_value())]).into_response()
    }
}

/// Fallback for verbs a route does not register
pub async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    tracing::debug!("{} not allowed on {}", method, uri.path());
    ApiError::method_not_allowed(method.as_str(), uri.path())
}

/// Fallback for paths no route matches
pub async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}
