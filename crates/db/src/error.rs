//! Typed error type for the db crate.

use query::QueryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The identified row does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request conflicts with stored data or is malformed.
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Query(#[from] QueryError),
}
