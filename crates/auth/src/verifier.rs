//! Token verification.
//!
//! A [`CredentialVerifier`] turns a raw bearer token into a [`Credential`].
//! Anything it cannot vouch for (bad signature, expired, malformed) becomes
//! `None`; decoding errors never reach the caller.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Credential;

/// Decodes raw tokens into credentials.
pub trait CredentialVerifier: Send + Sync {
    /// Return the credential carried by `raw_token`, or `None` if the token
    /// is not trustworthy.
    fn decode(&self, raw_token: &str) -> Option<Credential>;
}

/// Strip a `Bearer ` / `bearer ` prefix from an `Authorization` header value.
///
/// Returns `None` for an empty token.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let token = header_value
        .strip_prefix("Bearer ")
        .or_else(|| header_value.strip_prefix("bearer "))
        .unwrap_or(header_value)
        .trim();
    (!token.is_empty()).then_some(token)
}

// ---------------------------------------------------------------------------
// JWT
// ---------------------------------------------------------------------------

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
    /// Expiry (seconds since epoch); checked only when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// HS256 verifier keyed by a shared secret.
#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl CredentialVerifier for JwtVerifier {
    fn decode(&self, raw_token: &str) -> Option<Credential> {
        match decode::<Claims>(raw_token, &self.key, &self.validation) {
            Ok(data) => Some(Credential::new(data.claims.username, data.claims.is_admin)),
            Err(e) => {
                debug!("ignoring invalid token: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::*;

    const SECRET: &[u8] = b"secret-dev";

    fn sign(claims: &Claims, secret: &[u8]) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(secret)).unwrap()
    }

    fn claims(username: &str, is_admin: bool) -> Claims {
        Claims {
            username: username.into(),
            is_admin,
            exp: None,
        }
    }

    #[test]
    fn decodes_valid_token() {
        let verifier = JwtVerifier::from_secret(SECRET);

        let token = sign(&claims("test", false), SECRET);
        assert_eq!(verifier.decode(&token), Some(Credential::user("test")));

        let token = sign(&claims("testAdmin", true), SECRET);
        assert_eq!(verifier.decode(&token), Some(Credential::admin("testAdmin")));
    }

    #[test]
    fn wrong_secret_yields_no_credential() {
        let verifier = JwtVerifier::from_secret(SECRET);
        let token = sign(&claims("test", false), b"wrong");

        assert_eq!(verifier.decode(&token), None);
    }

    #[test]
    fn garbage_yields_no_credential() {
        let verifier = JwtVerifier::from_secret(SECRET);
        assert_eq!(verifier.decode("not-a-jwt"), None);
    }

    #[test]
    fn expired_token_yields_no_credential() {
        let verifier = JwtVerifier::from_secret(SECRET);
        let token = sign(
            &Claims {
                exp: Some(1),
                ..claims("test", false)
            },
            SECRET,
        );

        assert_eq!(verifier.decode(&token), None);
    }

    #[test]
    fn missing_admin_claim_defaults_to_false() {
        let verifier = JwtVerifier::from_secret(SECRET);
        let token = encode(
            &Header::default(),
            &serde_json::json!({ "username": "plain" }),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert_eq!(verifier.decode(&token), Some(Credential::user("plain")));
    }

    #[test]
    fn bearer_prefix_is_stripped() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer  abc "), Some("abc"));
        assert_eq!(bearer_token("Bearer "), None);
    }
}
