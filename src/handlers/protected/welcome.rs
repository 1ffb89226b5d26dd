// handlers/protected/welcome.rs - GET /protected and GET /admin/protected

use axum::Extension;

use crate::middleware::{ApiResponse, AuthUser, Message};

/// GET /protected - Any authenticated user
pub async fn welcome(Extension(user): Extension<AuthUser>) -> ApiResponse<Message> {
    ApiResponse::message(format!("Welcome {}!", user.username))
}

/// GET /admin/protected - Authenticated users holding the admin role
pub async fn admin_welcome(Extension(user): Extension<AuthUser>) -> ApiResponse<Message> {
    ApiResponse::message(format!("Admin access granted for {}!", user.username))
}
