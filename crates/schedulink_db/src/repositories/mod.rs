//! Entity store implementations.

pub mod entity_store_factory;
pub mod memory;
pub mod sql;

pub use entity_store_factory::EntityStoreFactory;
pub use memory::MemoryStore;
pub use sql::SqlEntityStore;
