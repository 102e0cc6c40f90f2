use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use auth::{require_admin, require_self_or_admin};
use db::models::{NewUser, UserPatch};
use db::repository::users as user_repo;

use super::AppState;
use crate::{middleware::CurrentUser, ApiError};

/// `POST /users`: admin only; may create other admins.
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    require_admin(user.credential())?;
    let Json(new_user) = payload?;
    new_user.validate()?;

    let created = user_repo::create(&state.pool, new_user).await?;
    Ok((StatusCode::CREATED, Json(json!({ "user": created }))))
}

/// `GET /users`: admin only.
pub async fn list(State(state): State<AppState>, user: CurrentUser) -> Result<Json<Value>, ApiError> {
    require_admin(user.credential())?;
    let users = user_repo::find_all(&state.pool).await?;
    Ok(Json(json!({ "users": users })))
}

/// `GET /users/:username`: the user themself or an admin.
pub async fn get(
    State(state): State<AppState>,
    user: CurrentUser,
    username: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(username) = username?;
    require_self_or_admin(user.credential(), &username)?;

    let found = user_repo::get(&state.pool, &username).await?;
    Ok(Json(json!({ "user": found })))
}

/// `PATCH /users/:username`: the user themself or an admin. Only admins
/// may change `isAdmin`.
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    username: Result<Path<String>, PathRejection>,
    payload: Result<Json<UserPatch>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(username) = username?;
    require_self_or_admin(user.credential(), &username)?;
    let Json(patch) = payload?;
    if patch.is_admin.is_some() {
        require_admin(user.credential())?;
    }
    patch.validate()?;

    let updated = user_repo::update(&state.pool, &username, patch).await?;
    Ok(Json(json!({ "user": updated })))
}

/// `DELETE /users/:username`: the user themself or an admin.
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    username: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(username) = username?;
    require_self_or_admin(user.credential(), &username)?;

    user_repo::remove(&state.pool, &username).await?;
    Ok(Json(json!({ "deleted": username })))
}
