// handlers/public/login.rs - POST /auth/login handler

use axum::extract::State;
use serde::Serialize;
use serde_json::Value;

use crate::api::extract::JsonBody;
use crate::auth::AuthError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /auth/login - Exchange username/password for a signed JWT
///
/// Expected Input:
/// ```json
/// { "username": "string", "password": "string" }
/// ```
///
/// Output: `200 {"token": "..."}`, or `401 {"error": "Invalid credentials"}`
/// when either field is missing or does not match a configured account.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Value>,
) -> ApiResult<LoginResponse> {
    let username = payload.get("username").and_then(Value::as_str);
    let password = payload.get("password").and_then(Value::as_str);

    let account = match (username, password) {
        (Some(username), Some(password)) => state.find_account(username, password),
        _ => None,
    }
    .ok_or_else(|| {
        tracing::warn!("login failed for '{}'", username.unwrap_or("<none>"));
        AuthError::InvalidCredentials
    })?;

    let token = state.tokens.issue(
        account.user_id,
        &account.username,
        account.role,
        state.tokens.default_ttl(),
    )?;

    tracing::info!("issued token for '{}' ({})", account.username, account.role);
    Ok(ApiResponse::success(LoginResponse { token }))
}
