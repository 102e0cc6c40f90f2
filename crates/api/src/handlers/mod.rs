//! Route handlers, one module per resource.
//!
//! Handlers check authorization first, then request shape, then call the
//! repository. Every error goes through [`crate::ApiError`].

use std::sync::Arc;

use auth::CredentialVerifier;
use axum::http::StatusCode;
use db::DbPool;

pub mod companies;
pub mod jobs;
pub mod users;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl AppState {
    pub fn new(pool: DbPool, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { pool, verifier }
    }
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
