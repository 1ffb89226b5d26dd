// handlers/protected/mod.rs - Handlers behind the bearer token guard chain
//
// Every handler here can rely on an `AuthUser` in the request extensions.
pub mod welcome;

pub use welcome::{admin_welcome, welcome};
