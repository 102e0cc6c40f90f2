//! User CRUD operations.
//!
//! Users carry no secrets here; issuing credentials happens elsewhere.

use query::build_update_fragment;
use sqlx::PgPool;
use tracing::debug;

use crate::{
    models::{NewUser, UserPatch, UserRow},
    DbError, Statement,
};

const COLUMNS: &str = "username, first_name, last_name, email, is_admin";

pub const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("firstName", "first_name"),
    ("lastName", "last_name"),
    ("isAdmin", "is_admin"),
];

fn not_found(username: &str) -> DbError {
    DbError::NotFound(format!("No user: {username}"))
}

/// `UPDATE` for [`update`]; the username is bound after the patched values.
pub fn update_statement(username: &str, patch: UserPatch) -> Result<Statement, DbError> {
    let set = build_update_fragment(patch.into_field_map(), COLUMN_ALIASES)?;
    Ok(Statement::update("users", set, "username", username, COLUMNS))
}

/// Insert a new user; `DbError::BadRequest` if the username is taken.
pub async fn create(pool: &PgPool, user: NewUser) -> Result<UserRow, DbError> {
    let duplicate = sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE username = $1")
        .bind(user.username.as_str())
        .fetch_optional(pool)
        .await?;

    if duplicate.is_some() {
        return Err(DbError::BadRequest(format!("Duplicate username: {}", user.username)));
    }

    let row = sqlx::query_as::<_, UserRow>(&format!(
        "INSERT INTO users ({COLUMNS}) VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
    ))
    .bind(user.username)
    .bind(user.first_name)
    .bind(user.last_name)
    .bind(user.email)
    .bind(user.is_admin)
    .fetch_one(pool)
    .await?;

    debug!(username = %row.username, "user created");
    Ok(row)
}

/// Return all users ordered by username.
pub async fn find_all(pool: &PgPool) -> Result<Vec<UserRow>, DbError> {
    let rows = sqlx::query_as::<_, UserRow>(&format!("SELECT {COLUMNS} FROM users ORDER BY username"))
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn get(pool: &PgPool, username: &str) -> Result<UserRow, DbError> {
    let row = sqlx::query_as::<_, UserRow>(&format!("SELECT {COLUMNS} FROM users WHERE username = $1"))
        .bind(username)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(username))?;
    Ok(row)
}

pub async fn update(pool: &PgPool, username: &str, patch: UserPatch) -> Result<UserRow, DbError> {
    let row = update_statement(username, patch)?
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(username))?;

    debug!(username, "user updated");
    Ok(row)
}

pub async fn remove(pool: &PgPool, username: &str) -> Result<(), DbError> {
    sqlx::query_scalar::<_, String>("DELETE FROM users WHERE username = $1 RETURNING username")
        .bind(username)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(username))?;

    debug!(username, "user removed");
    Ok(())
}
