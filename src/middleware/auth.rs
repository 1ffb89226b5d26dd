use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::{AuthError, Claims, Role, TokenService};
use crate::error::ApiError;

/// Authenticated user context extracted from a verified JWT
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
            role: claims.role,
        }
    }
}

/// One step of request interception. A guard either lets the request through
/// (possibly after annotating its extensions) or rejects it.
pub trait Guard: Send + Sync {
    fn intercept(&self, request: &mut Request) -> Result<(), ApiError>;
}

/// Requires a valid bearer token and attaches the resulting [`AuthUser`].
#[derive(Clone)]
pub struct Authenticate {
    tokens: Arc<TokenService>,
}

impl Authenticate {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

impl Guard for Authenticate {
    fn intercept(&self, request: &mut Request) -> Result<(), ApiError> {
        let token = extract_bearer_token(request.headers())?;
        let claims = self.tokens.verify(token)?;

        tracing::debug!(user = %claims.username, role = %claims.role, "request authenticated");
        request.extensions_mut().insert(AuthUser::from(claims));
        Ok(())
    }
}

/// Requires the authenticated user to hold a specific role. Must run after
/// [`Authenticate`].
#[derive(Clone, Copy, Debug)]
pub struct RequireRole(pub Role);

impl Guard for RequireRole {
    fn intercept(&self, request: &mut Request) -> Result<(), ApiError> {
        let Some(user) = request.extensions().get::<AuthUser>() else {
            tracing::error!("role check for '{}' ran without an authenticated user", self.0);
            return Err(AuthError::Forbidden.into());
        };

        if user.role != self.0 {
            tracing::warn!(
                "user '{}' with role '{}' denied, '{}' required",
                user.username,
                user.role,
                self.0
            );
            return Err(AuthError::Forbidden.into());
        }
        Ok(())
    }
}

/// Ordered guards applied to a group of routes; the first rejection wins.
#[derive(Clone, Default)]
pub struct GuardChain {
    guards: Vec<Arc<dyn Guard>>,
}

impl GuardChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, guard: impl Guard + 'static) -> Self {
        self.guards.push(Arc::new(guard));
        self
    }

    pub fn run(&self, request: &mut Request) -> Result<(), ApiError> {
        self.guards
            .iter()
            .try_for_each(|guard| guard.intercept(request))
    }
}

/// Axum middleware running a [`GuardChain`] before the wrapped handler
pub async fn guard_middleware(
    State(chain): State<GuardChain>,
    mut request: Request,
    next: Next,
) -> Response {
    match chain.run(&mut request) {
        Ok(()) => next.run(request).await,
        Err(err) => err.into_response(),
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?;

    let value = value.to_str().map_err(|_| {
        tracing::warn!("token rejected: Authorization header is not valid ASCII");
        AuthError::InvalidToken
    })?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => {
            tracing::warn!("token rejected: Authorization header is not a bearer token");
            Err(AuthError::InvalidToken)
        }
    }
}
