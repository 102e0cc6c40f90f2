use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use auth::require_admin;
use db::models::{CompanyPatch, NewCompany};
use db::repository::companies as company_repo;
use query::CompanyFilter;

use super::AppState;
use crate::{middleware::CurrentUser, ApiError};

/// `POST /companies`: admin only.
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<NewCompany>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    require_admin(user.credential())?;
    let Json(company) = payload?;
    company.validate()?;

    let company = company_repo::create(&state.pool, company).await?;
    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

/// `GET /companies?nameLike=&minEmployees=&maxEmployees=`
pub async fn list(
    State(state): State<AppState>,
    filter: Result<Query<CompanyFilter>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(filter) = filter?;
    let companies = company_repo::find_all(&state.pool, &filter).await?;
    Ok(Json(json!({ "companies": companies })))
}

/// `GET /companies/:handle`: the company with its jobs.
pub async fn get(
    State(state): State<AppState>,
    handle: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(handle) = handle?;
    let company = company_repo::get(&state.pool, &handle).await?;
    Ok(Json(json!({ "company": company })))
}

/// `PATCH /companies/:handle`: admin only.
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    handle: Result<Path<String>, PathRejection>,
    payload: Result<Json<CompanyPatch>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    require_admin(user.credential())?;
    let Path(handle) = handle?;
    let Json(patch) = payload?;
    patch.validate()?;

    let company = company_repo::update(&state.pool, &handle, patch).await?;
    Ok(Json(json!({ "company": company })))
}

/// `DELETE /companies/:handle`: admin only.
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    handle: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    require_admin(user.credential())?;
    let Path(handle) = handle?;

    company_repo::remove(&state.pool, &handle).await?;
    Ok(Json(json!({ "deleted": handle })))
}
