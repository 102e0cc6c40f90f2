//! `auth` crate: decoded credentials and the authorization gate.
//!
//! Token verification sits behind the [`CredentialVerifier`] trait so the
//! HTTP layer only ever sees a trustworthy [`Credential`] or nothing at all.
//! The gate functions in [`gate`] are plain predicates over that value.

pub mod credential;
pub mod error;
pub mod gate;
pub mod mock;
pub mod verifier;

pub use credential::Credential;
pub use error::AuthError;
pub use gate::{require_admin, require_authenticated, require_self_or_admin};
pub use verifier::{bearer_token, Claims, CredentialVerifier, JwtVerifier};
