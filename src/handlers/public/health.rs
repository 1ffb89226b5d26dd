use axum::extract::State;
use serde::Serialize;

use crate::middleware::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub containers: usize,
}

/// GET /health - Liveness plus the current record count
pub async fn health(State(state): State<AppState>) -> ApiResponse<Health> {
    ApiResponse::success(Health {
        status: "ok",
        containers: state.store.len(),
    })
}
