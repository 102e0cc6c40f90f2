//! Router-level tests for authorization and request-shape handling.
//!
//! The pool is created with `connect_lazy`, so every request exercised here
//! must be answered before any statement reaches Postgres: gate failures,
//! malformed input, and builder errors (empty patch, inverted range).

use std::sync::Arc;

use api::{build_router, AppState};
use auth::{mock::StaticVerifier, Credential, CredentialVerifier, JwtVerifier};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

const USER_TOKEN: &str = "u1-token";
const ADMIN_TOKEN: &str = "admin-token";

fn app_with(verifier: Arc<dyn CredentialVerifier>) -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/jobly_test")
        .expect("valid database url");
    build_router(AppState::new(pool, verifier))
}

fn app() -> Router {
    let verifier = StaticVerifier::new()
        .with_token(USER_TOKEN, Credential::user("u1"))
        .with_token(ADMIN_TOKEN, Credential::admin("admin"));
    app_with(Arc::new(verifier))
}

async fn send(app: Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

async fn body_json(resp: Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or(Value::Null)
}

// ============================================================
// Plumbing
// ============================================================

#[tokio::test]
async fn health_is_public_and_tagged_with_request_id() {
    let resp = send(app(), Method::GET, "/health", None, None).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn error_body_shape() {
    let resp = send(app(), Method::POST, "/jobs", None, Some(json!({}))).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(resp).await,
        json!({ "error": { "message": "Unauthorized", "status": 401 } })
    );
}

// ============================================================
// Jobs
// ============================================================

#[tokio::test]
async fn create_job_unauth_for_anon_and_non_admin() {
    let body = json!({ "title": "J", "salary": 1, "equity": "0.1", "companyHandle": "c1" });

    let resp = send(app(), Method::POST, "/jobs", None, Some(body.clone())).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = send(app(), Method::POST, "/jobs", Some(USER_TOKEN), Some(body)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_job_bad_request_for_invalid_data() {
    let body = json!({ "title": "J", "salary": -5, "companyHandle": "c1" });
    let resp = send(app(), Method::POST, "/jobs", Some(ADMIN_TOKEN), Some(body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = json!({ "title": "J" });
    let resp = send(app(), Method::POST, "/jobs", Some(ADMIN_TOKEN), Some(body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_job_with_no_fields_is_bad_request() {
    let resp = send(app(), Method::PATCH, "/jobs/1", Some(ADMIN_TOKEN), Some(json!({}))).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"]["message"], "No data");
}

#[tokio::test]
async fn patch_job_cannot_change_company() {
    let body = json!({ "companyHandle": "c2" });
    let resp = send(app(), Method::PATCH, "/jobs/1", Some(ADMIN_TOKEN), Some(body)).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_job_with_null_title_is_bad_request() {
    let body = json!({ "title": null, "salary": 5 });
    let resp = send(app(), Method::PATCH, "/jobs/1", Some(ADMIN_TOKEN), Some(body)).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"]["message"], "title cannot be null");
}

#[tokio::test]
async fn patch_and_delete_job_unauth_for_non_admin() {
    let resp = send(app(), Method::PATCH, "/jobs/1", Some(USER_TOKEN), Some(json!({ "title": "x" }))).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = send(app(), Method::DELETE, "/jobs/1", None, None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_jobs_rejects_malformed_filters() {
    let resp = send(app(), Method::GET, "/jobs?minSalary=not-a-number", None, None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(app(), Method::GET, "/jobs?salary=10", None, None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn job_id_must_be_an_integer() {
    let resp = send(app(), Method::GET, "/jobs/abc", None, None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================
// Companies
// ============================================================

#[tokio::test]
async fn list_companies_rejects_inverted_range() {
    let resp = send(
        app(),
        Method::GET,
        "/companies?minEmployees=500&maxEmployees=100",
        None,
        None,
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let message = body_json(resp).await["error"]["message"].as_str().unwrap().to_owned();
    assert!(message.contains("cannot be greater than"));
}

#[tokio::test]
async fn create_company_validates_handle() {
    let body = json!({ "handle": "Not Lower", "name": "N" });
    let resp = send(app(), Method::POST, "/companies", Some(ADMIN_TOKEN), Some(body)).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_company_unauth_for_non_admin() {
    let body = json!({ "name": "New" });
    let resp = send(app(), Method::PATCH, "/companies/c1", Some(USER_TOKEN), Some(body)).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn patch_company_with_no_fields_is_bad_request() {
    let resp = send(app(), Method::PATCH, "/companies/c1", Some(ADMIN_TOKEN), Some(json!({}))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_company_with_null_name_is_not_an_empty_update() {
    let body = json!({ "name": null });
    let resp = send(app(), Method::PATCH, "/companies/c1", Some(ADMIN_TOKEN), Some(body)).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"]["message"], "name cannot be null");
}

// ============================================================
// Users
// ============================================================

#[tokio::test]
async fn users_list_is_admin_only() {
    let resp = send(app(), Method::GET, "/users", Some(USER_TOKEN), None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_cannot_touch_another_user() {
    let resp = send(app(), Method::GET, "/users/someone-else", Some(USER_TOKEN), None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body = json!({ "firstName": "X" });
    let resp = send(app(), Method::PATCH, "/users/someone-else", Some(USER_TOKEN), Some(body)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = send(app(), Method::DELETE, "/users/someone-else", Some(USER_TOKEN), None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_cannot_grant_themself_admin() {
    let body = json!({ "isAdmin": true });
    let resp = send(app(), Method::PATCH, "/users/u1", Some(USER_TOKEN), Some(body)).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_patch_of_self_with_no_fields_is_bad_request() {
    let resp = send(app(), Method::PATCH, "/users/u1", Some(USER_TOKEN), Some(json!({}))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================
// Token decoding
// ============================================================

#[tokio::test]
async fn unknown_token_is_treated_as_anonymous() {
    let verifier = Arc::new(StaticVerifier::new().with_token(ADMIN_TOKEN, Credential::admin("admin")));
    let app = app_with(verifier.clone());

    let resp = send(app, Method::DELETE, "/companies/c1", Some("forged"), None).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(verifier.call_count(), 1);
}

#[tokio::test]
async fn jwt_signed_with_wrong_secret_is_ignored() {
    let app = app_with(Arc::new(JwtVerifier::from_secret(b"server-secret")));
    let token = encode(
        &Header::default(),
        &json!({ "username": "admin", "isAdmin": true }),
        &EncodingKey::from_secret(b"wrong"),
    )
    .unwrap();

    let resp = send(app, Method::DELETE, "/jobs/1", Some(&token), None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn jwt_admin_reaches_the_builder() {
    let app = app_with(Arc::new(JwtVerifier::from_secret(b"server-secret")));
    let token = encode(
        &Header::default(),
        &json!({ "username": "admin", "isAdmin": true }),
        &EncodingKey::from_secret(b"server-secret"),
    )
    .unwrap();

    // Authorized, then rejected by the empty-update check before any I/O.
    let resp = send(app, Method::PATCH, "/jobs/1", Some(&token), Some(json!({}))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
