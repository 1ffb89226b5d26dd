pub mod auth;
pub mod response;

pub use auth::{guard_middleware, AuthUser, Authenticate, Guard, GuardChain, RequireRole};
pub use response::{ApiResponse, ApiResult, Message};
