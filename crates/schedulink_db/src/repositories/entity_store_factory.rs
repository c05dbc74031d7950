//! Factory for entity stores

use crate::repositories::{MemoryStore, SqlEntityStore};
use crate::{DbClient, RepositoryFactory};

/// Builds either store flavour.
#[derive(Debug, Clone, Default)]
pub struct EntityStoreFactory;

impl EntityStoreFactory {
    pub fn new() -> Self {
        Self
    }
}

impl RepositoryFactory<SqlEntityStore, DbClient> for EntityStoreFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlEntityStore {
        SqlEntityStore::new(db_client)
    }
}

impl RepositoryFactory<MemoryStore, ()> for EntityStoreFactory {
    fn create_repository(&self, _: ()) -> MemoryStore {
        MemoryStore::new()
    }
}
