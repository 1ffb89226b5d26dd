pub mod dispatch;
pub mod extract;

use axum::{middleware, routing::get, routing::post, Router};
use tower_http::trace::TraceLayer;

use crate::auth::Role;
use crate::handlers::{orchestrator, protected, public};
use crate::middleware::{guard_middleware, Authenticate, GuardChain, RequireRole};
use crate::state::AppState;

use dispatch::{method_not_allowed, not_found, AllowedMethods};

/// Build the full application router around `state`
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/health", get(public::health))
        .merge(auth_public_routes())
        // Bearer token required
        .merge(protected_routes(&state))
        // Container registry (unauthenticated)
        .merge(container_routes())
        .fallback(not_found)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    Router::new().route(
        "/auth/login",
        post(public::login)
            .options(|| async { AllowedMethods::LOGIN })
            .fallback(method_not_allowed),
    )
}

fn protected_routes(state: &AppState) -> Router<AppState> {
    let authenticated = GuardChain::new().then(Authenticate::new(state.tokens.clone()));
    let admin = authenticated.clone().then(RequireRole(Role::Admin));

    // Guards wrap only the GET handlers; OPTIONS and the 405 fallback are
    // answered without credentials.
    Router::new()
        .route(
            "/protected",
            get(protected::welcome)
                .route_layer(middleware::from_fn_with_state(authenticated, guard_middleware))
                .options(|| async { AllowedMethods::READ_ONLY })
                .fallback(method_not_allowed),
        )
        .route(
            "/admin/protected",
            get(protected::admin_welcome)
                .route_layer(middleware::from_fn_with_state(admin, guard_middleware))
                .options(|| async { AllowedMethods::READ_ONLY })
                .fallback(method_not_allowed),
        )
}

fn container_routes() -> Router<AppState> {
    Router::new()
        // Collection operations
        .route(
            "/orchestrator/containers",
            get(orchestrator::list)
                .post(orchestrator::create)
                .options(|| async { AllowedMethods::CONTAINERS })
                .fallback(method_not_allowed),
        )
        // Item operations
        .route(
            "/orchestrator/containers/:id",
            get(orchestrator::get)
                .put(orchestrator::update)
                .delete(orchestrator::delete)
                .options(|| async { AllowedMethods::CONTAINER })
                .fallback(method_not_allowed),
        )
}
