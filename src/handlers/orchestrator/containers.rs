// handlers/orchestrator/containers.rs - /orchestrator/containers[/:id]

use axum::extract::State;
use serde_json::Value;

use crate::api::extract::{ContainerId, JsonBody};
use crate::database::{Container, ContainerFields};
use crate::middleware::{ApiResponse, ApiResult, Message};
use crate::state::AppState;

/// POST /orchestrator/containers - Create a container (201)
///
/// `Hostname` is required; `Entrypoint` defaults to `""` and `Image` to
/// `"ubuntu"`. Duplicate hostnames are accepted.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Value>,
) -> ApiResult<Container> {
    let container = state.store.insert(ContainerFields::from_json(&payload))?;
    Ok(ApiResponse::created(container))
}

/// GET /orchestrator/containers - Every container, or 400 when there are none
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Container>> {
    Ok(ApiResponse::success(state.store.list_all()?))
}

/// GET /orchestrator/containers/:id
pub async fn get(State(state): State<AppState>, ContainerId(id): ContainerId) -> ApiResult<Container> {
    Ok(ApiResponse::success(state.store.get(id)?))
}

/// PUT /orchestrator/containers/:id - Merge `Hostname`, `Entrypoint` and
/// `Image` from the body into the record. Other keys, `id` included, are
/// ignored; `{}` is a no-op that still answers 200.
pub async fn update(
    State(state): State<AppState>,
    ContainerId(id): ContainerId,
    JsonBody(payload): JsonBody<Value>,
) -> ApiResult<Container> {
    let container = state.store.update(id, ContainerFields::from_json(&payload))?;
    Ok(ApiResponse::success(container))
}

/// DELETE /orchestrator/containers/:id
pub async fn delete(State(state): State<AppState>, ContainerId(id): ContainerId) -> ApiResult<Message> {
    state.store.delete(id)?;
    Ok(ApiResponse::message(format!("container {} deleted", id)))
}
