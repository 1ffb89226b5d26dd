pub mod containers;

// Re-export handler functions for use in routing
pub use containers::create;
pub use containers::delete;
pub use containers::get;
pub use containers::list;
pub use containers::update;
