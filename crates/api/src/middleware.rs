//! Request middleware: bearer-token authentication and request ids.

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::{header, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

use auth::{bearer_token, Credential};

use crate::handlers::AppState;

/// Decode the `Authorization` header, if any, and stash the credential in
/// the request extensions.
///
/// A missing or untrustworthy token is not an error here: the request simply
/// proceeds without a credential and the handler's gate decides.
pub async fn authenticate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let credential = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
        .and_then(|token| state.verifier.decode(token));

    if let Some(credential) = credential {
        request.extensions_mut().insert(credential);
    }

    next.run(request).await
}

/// Add a unique `X-Request-ID` header to every response.
pub async fn add_request_id(request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert("X-Request-ID", value);
    }
    response
}

/// The caller's credential as left by [`authenticate`]; `None` for anonymous
/// requests.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<Credential>);

impl CurrentUser {
    pub fn credential(&self) -> Option<&Credential> {
        self.0.as_ref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<Credential>().cloned()))
    }
}
