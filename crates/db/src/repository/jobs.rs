//! Job CRUD operations.

use query::{build_job_filter_fragment, build_update_fragment, JobFilter};
use sqlx::PgPool;
use tracing::debug;

use crate::{
    models::{JobPatch, JobRow, NewJob},
    DbError, Statement,
};

const COLUMNS: &str = "id, title, salary, equity, company_handle";

fn not_found(id: i32) -> DbError {
    DbError::NotFound(format!("No job: {id}"))
}

/// `SELECT` for [`find_all`], filtered by `filter` and ordered by title.
pub fn select_statement(filter: &JobFilter) -> Statement {
    Statement::filtered(
        &format!("SELECT {COLUMNS} FROM jobs"),
        build_job_filter_fragment(filter),
        "ORDER BY title",
    )
}

/// `UPDATE` for [`update`]; the id is bound after the patched values.
///
/// Job fields share their column names, so no aliases are needed.
pub fn update_statement(id: i32, patch: JobPatch) -> Result<Statement, DbError> {
    let set = build_update_fragment(patch.into_field_map(), &[])?;
    Ok(Statement::update("jobs", set, "id", id, COLUMNS))
}

/// Insert a new job under an existing company.
///
/// Returns `DbError::BadRequest` if the company does not exist.
pub async fn create(pool: &PgPool, job: NewJob) -> Result<JobRow, DbError> {
    let company = sqlx::query_scalar::<_, String>("SELECT handle FROM companies WHERE handle = $1")
        .bind(job.company_handle.as_str())
        .fetch_optional(pool)
        .await?;

    if company.is_none() {
        return Err(DbError::BadRequest(format!(
            "Nonexistent company: {}",
            job.company_handle
        )));
    }

    let row = sqlx::query_as::<_, JobRow>(&format!(
        "INSERT INTO jobs (title, salary, equity, company_handle) VALUES ($1, $2, $3, $4) RETURNING {COLUMNS}"
    ))
    .bind(job.title)
    .bind(job.salary)
    .bind(job.equity)
    .bind(job.company_handle)
    .fetch_one(pool)
    .await?;

    debug!(id = row.id, "job created");
    Ok(row)
}

/// Return every job matching `filter`, ordered by title.
pub async fn find_all(pool: &PgPool, filter: &JobFilter) -> Result<Vec<JobRow>, DbError> {
    let rows = select_statement(filter).fetch_all(pool).await?;
    Ok(rows)
}

/// Fetch a single job by id.
pub async fn get(pool: &PgPool, id: i32) -> Result<JobRow, DbError> {
    let row = sqlx::query_as::<_, JobRow>(&format!("SELECT {COLUMNS} FROM jobs WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(row)
}

/// Apply a partial update.
pub async fn update(pool: &PgPool, id: i32, patch: JobPatch) -> Result<JobRow, DbError> {
    let row = update_statement(id, patch)?
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(id))?;

    debug!(id, "job updated");
    Ok(row)
}

/// Delete a job by id.
pub async fn remove(pool: &PgPool, id: i32) -> Result<(), DbError> {
    sqlx::query_scalar::<_, i32>("DELETE FROM jobs WHERE id = $1 RETURNING id")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(id))?;

    debug!(id, "job removed");
    Ok(())
}
