//! The decoded, already-verified identity attached to a request.

use serde::{Deserialize, Serialize};

/// Who is calling, as vouched for by a [`crate::CredentialVerifier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl Credential {
    pub fn new(username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            username: username.into(),
            is_admin,
        }
    }

    /// A regular, non-admin user.
    pub fn user(username: impl Into<String>) -> Self {
        Self::new(username, false)
    }

    pub fn admin(username: impl Into<String>) -> Self {
        Self::new(username, true)
    }
}
