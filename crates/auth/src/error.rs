//! Authorization error type.

use thiserror::Error;

/// Raised when an authorization predicate fails.
///
/// Deliberately carries no detail: callers must not learn whether the
/// credential was missing, non-admin, or for another user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Unauthorized")]
    Unauthorized,
}
