// handlers/mod.rs - Handlers grouped by access tier
//
// Public (no auth) → Protected (bearer token, optional role) → Orchestrator (container registry)
pub mod orchestrator;
pub mod protected;
pub mod public;
