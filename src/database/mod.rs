pub mod container;
pub mod store;

pub use container::{Container, ContainerFields, DEFAULT_ENTRYPOINT, DEFAULT_IMAGE};
pub use store::{next_id, ContainerStore, StoreError};
