use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use auth::require_admin;
use db::models::{JobPatch, NewJob};
use db::repository::jobs as job_repo;
use query::JobFilter;

use super::AppState;
use crate::{middleware::CurrentUser, ApiError};

/// `POST /jobs`: admin only.
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<NewJob>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    require_admin(user.credential())?;
    let Json(job) = payload?;
    job.validate()?;

    let job = job_repo::create(&state.pool, job).await?;
    Ok((StatusCode::CREATED, Json(json!({ "job": job }))))
}

/// `GET /jobs?title=&minSalary=&hasEquity=`
pub async fn list(
    State(state): State<AppState>,
    filter: Result<Query<JobFilter>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(filter) = filter?;
    let jobs = job_repo::find_all(&state.pool, &filter).await?;
    Ok(Json(json!({ "jobs": jobs })))
}

/// `GET /jobs/:id`
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let job = job_repo::get(&state.pool, id).await?;
    Ok(Json(json!({ "job": job })))
}

/// `PATCH /jobs/:id`: admin only. `companyHandle` cannot be changed.
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<JobPatch>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    require_admin(user.credential())?;
    let Path(id) = id?;
    let Json(patch) = payload?;
    patch.validate()?;

    let job = job_repo::update(&state.pool, id, patch).await?;
    Ok(Json(json!({ "job": job })))
}

/// `DELETE /jobs/:id`: admin only.
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    require_admin(user.credential())?;
    let Path(id) = id?;

    job_repo::remove(&state.pool, id).await?;
    Ok(Json(json!({ "deleted": id })))
}
