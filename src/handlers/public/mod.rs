// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition and liveness. No guards are applied to these routes.
pub mod health;
pub mod login;

pub use health::health;
pub use login::login;
