//! `StaticVerifier`: a test double for `CredentialVerifier`.
//!
//! Maps fixed token strings to credentials so router tests can authenticate
//! without signing real tokens.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::{Credential, CredentialVerifier};

/// A verifier backed by a fixed token table that records every token it sees.
#[derive(Default)]
pub struct StaticVerifier {
    tokens: HashMap<String, Credential>,
    /// All raw tokens seen by this verifier (in call order).
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl StaticVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `token` as `credential`.
    pub fn with_token(mut self, token: impl Into<String>, credential: Credential) -> Self {
        self.tokens.insert(token.into(), credential);
        self
    }

    /// Number of tokens this verifier has been asked to decode.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }
}

impl CredentialVerifier for StaticVerifier {
    fn decode(&self, raw_token: &str) -> Option<Credential> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(raw_token.to_owned());
        }
        self.tokens.get(raw_token).cloned()
    }
}
