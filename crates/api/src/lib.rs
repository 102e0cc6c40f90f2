//! `api` crate: HTTP REST API layer.
//!
//! Exposes:
//!   POST   /companies            GET /companies         (admin / anyone)
//!   GET    /companies/:handle    PATCH, DELETE          (anyone / admin)
//!   POST   /jobs                 GET /jobs              (admin / anyone)
//!   GET    /jobs/:id             PATCH, DELETE          (anyone / admin)
//!   POST   /users                GET /users             (admin)
//!   GET    /users/:username      PATCH, DELETE          (self or admin)
//!   GET    /health

use std::sync::Arc;

use axum::{middleware as axum_mw, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use auth::JwtVerifier;
use db::DbPool;

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;

pub use config::ApiConfig;
pub use error::ApiError;
pub use handlers::AppState;

use handlers::{companies, jobs, users};

/// Build the full router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/companies", get(companies::list).post(companies::create))
        .route(
            "/companies/:handle",
            get(companies::get)
                .patch(companies::update)
                .delete(companies::delete),
        )
        .route("/jobs", get(jobs::list).post(jobs::create))
        .route(
            "/jobs/:id",
            get(jobs::get).patch(jobs::update).delete(jobs::delete),
        )
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/:username",
            get(users::get).patch(users::update).delete(users::delete),
        )
        .layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::authenticate,
        ))
        .layer(axum_mw::from_fn(middleware::add_request_id))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `config.bind_addr` and serve until the process is stopped.
pub async fn serve(config: &ApiConfig, pool: DbPool) -> std::io::Result<()> {
    let verifier = Arc::new(JwtVerifier::from_secret(config.jwt_secret.as_bytes()));
    let app = build_router(AppState::new(pool, verifier));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("API server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await
}
