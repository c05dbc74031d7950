//! Entity store for Schedulink
//!
//! This crate holds the storage side of the scheduling backend: the
//! [`EntityStore`] trait the booking services are written against, an
//! in-memory implementation, and a SQL implementation on top of an SQLx
//! `Any` pool.
//!
//! # Features
//!
//! - `sqlite` (default): SQLite driver for the SQL store
//! - `postgres`: PostgreSQL driver for the SQL store
//!
//! # Example
//!
//! ```rust,no_run
//! use schedulink_db::{DbClient, EntityStore, SqlEntityStore};
//!
//! async fn setup_store() -> Result<SqlEntityStore, Box<dyn std::error::Error>> {
//!     let db_client = DbClient::from_url("sqlite:data/schedulink.db").await?;
//!     let store = SqlEntityStore::new(db_client);
//!     store.init_schema().await?;
//!     let _users = store.list_users().await?;
//!     Ok(store)
//! }
//! ```

pub mod client;
pub mod error;
pub mod factory;
pub mod repositories;
pub mod repository;

pub use client::DbClient;
pub use error::DbError;
pub use factory::DbClientFactory;
pub use repository::{BookingChange, EntityStore, RepositoryFactory, SwapOutcome};

pub use repositories::{EntityStoreFactory, MemoryStore, SqlEntityStore};
