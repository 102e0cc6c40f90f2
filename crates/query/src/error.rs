//! Builder-level error types.

use thiserror::Error;

/// Errors produced while building a SQL fragment.
///
/// Both variants describe a bad client request; the HTTP layer maps them to
/// `400 Bad Request`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A partial update was requested with no fields to set.
    #[error("No data")]
    EmptyUpdate,

    /// The employee-count range filter is self-contradictory.
    #[error("minEmployees ({min}) cannot be greater than maxEmployees ({max})")]
    InvalidRange { min: i32, max: i32 },
}
