//! `db` crate: persistence layer.
//!
//! Provides a connection pool, typed row structs, and repository functions
//! for the `companies`, `jobs`, and `users` tables. Dynamic `SET` / `WHERE`
//! clauses come from the `query` crate; this crate glues them into full
//! statements and runs them.

pub mod error;
pub mod models;
pub mod pool;
pub mod repository;
pub mod statement;

pub use error::DbError;
pub use pool::DbPool;
pub use statement::Statement;
