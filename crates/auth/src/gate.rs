//! Authorization predicates.
//!
//! Each check takes the request's credential (`None` when no valid token was
//! presented) and either passes or fails with [`AuthError::Unauthorized`].
//! No I/O and no logging.

use crate::{AuthError, Credential};

/// The credential, if it names a user.
fn signed_in(credential: Option<&Credential>) -> Option<&Credential> {
    credential.filter(|c| !c.username.is_empty())
}

/// Passes iff a credential with a non-empty username is present.
pub fn require_authenticated(credential: Option<&Credential>) -> Result<(), AuthError> {
    signed_in(credential)
        .map(|_| ())
        .ok_or(AuthError::Unauthorized)
}

/// Passes iff the caller is signed in and is an admin.
pub fn require_admin(credential: Option<&Credential>) -> Result<(), AuthError> {
    match signed_in(credential) {
        Some(c) if c.is_admin => Ok(()),
        _ => Err(AuthError::Unauthorized),
    }
}

/// Passes iff the caller is `target_username` or is an admin.
pub fn require_self_or_admin(
    credential: Option<&Credential>,
    target_username: &str,
) -> Result<(), AuthError> {
    match credential {
        Some(c) if c.is_admin || c.username == target_username => Ok(()),
        _ => Err(AuthError::Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticated_requires_username() {
        assert!(require_authenticated(Some(&Credential::user("test"))).is_ok());
        assert_eq!(require_authenticated(None), Err(AuthError::Unauthorized));
        assert_eq!(
            require_authenticated(Some(&Credential::user(""))),
            Err(AuthError::Unauthorized)
        );
    }

    #[test]
    fn admin_requires_flag_and_username() {
        assert!(require_admin(Some(&Credential::admin("testAdmin"))).is_ok());
        assert_eq!(
            require_admin(Some(&Credential::user("test"))),
            Err(AuthError::Unauthorized)
        );
        assert_eq!(require_admin(Some(&Credential::admin(""))), Err(AuthError::Unauthorized));
        assert_eq!(require_admin(None), Err(AuthError::Unauthorized));
    }

    #[test]
    fn self_or_admin() {
        let alice = Credential::user("alice");
        let bob_admin = Credential::admin("bob");

        assert!(require_self_or_admin(Some(&alice), "alice").is_ok());
        assert_eq!(
            require_self_or_admin(Some(&alice), "bob"),
            Err(AuthError::Unauthorized)
        );
        assert!(require_self_or_admin(Some(&bob_admin), "alice").is_ok());
        assert_eq!(require_self_or_admin(None, "alice"), Err(AuthError::Unauthorized));
    }
}
