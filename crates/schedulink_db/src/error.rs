//! Error types for the entity store

use thiserror::Error;

/// Errors that can occur when working with the entity store
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// Error with database transaction
    #[error("Database transaction error: {0}")]
    TransactionError(String),

    /// A write would break a uniqueness constraint (e.g. user email)
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),
}

impl DbError {
    /// Maps a failed query, singling out unique-constraint violations.
    pub(crate) fn from_query(err: sqlx::Error, subject: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DbError::UniqueViolation(subject.to_string())
            }
            _ => DbError::QueryError(err.to_string()),
        }
    }
}
