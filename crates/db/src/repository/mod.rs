//! Repository functions: one function per database operation.
//!
//! Every function takes a `&DbPool` and returns a `Result<T, DbError>`.
//! Statements with a dynamic shape are built by pure `*_statement` helpers
//! first. Multi-step operations (existence check, then write) are separate
//! round trips and are not wrapped in a transaction.

pub mod companies;
pub mod jobs;
pub mod users;
