//! Company CRUD operations.

use query::{build_company_filter_fragment, build_update_fragment, CompanyFilter};
use sqlx::PgPool;
use tracing::debug;

use crate::{
    models::{CompanyDetail, CompanyJobRow, CompanyPatch, CompanyRow, NewCompany},
    DbError, Statement,
};

const COLUMNS: &str = "handle, name, description, num_employees, logo_url";

/// Logical field -> column for fields whose names differ.
pub const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
];

fn not_found(handle: &str) -> DbError {
    DbError::NotFound(format!("No company: {handle}"))
}

/// `SELECT` for [`find_all`], filtered by `filter` and ordered by name.
pub fn select_statement(filter: &CompanyFilter) -> Result<Statement, DbError> {
    let fragment = build_company_filter_fragment(filter)?;
    Ok(Statement::filtered(
        &format!("SELECT {COLUMNS} FROM companies"),
        fragment,
        "ORDER BY name",
    ))
}

/// `UPDATE` for [`update`]; the handle is bound after the patched values.
pub fn update_statement(handle: &str, patch: CompanyPatch) -> Result<Statement, DbError> {
    let set = build_update_fragment(patch.into_field_map(), COLUMN_ALIASES)?;
    Ok(Statement::update("companies", set, "handle", handle, COLUMNS))
}

/// Insert a new company.
///
/// Returns `DbError::BadRequest` if the handle is already taken. The
/// duplicate check and the insert are separate round trips.
pub async fn create(pool: &PgPool, company: NewCompany) -> Result<CompanyRow, DbError> {
    let duplicate = sqlx::query_scalar::<_, String>("SELECT handle FROM companies WHERE handle = $1")
        .bind(company.handle.as_str())
        .fetch_optional(pool)
        .await?;

    if duplicate.is_some() {
        return Err(DbError::BadRequest(format!("Duplicate company: {}", company.handle)));
    }

    let row = sqlx::query_as::<_, CompanyRow>(&format!(
        "INSERT INTO companies ({COLUMNS}) VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
    ))
    .bind(company.handle)
    .bind(company.name)
    .bind(company.description)
    .bind(company.num_employees)
    .bind(company.logo_url)
    .fetch_one(pool)
    .await?;

    debug!(handle = %row.handle, "company created");
    Ok(row)
}

/// Return every company matching `filter`, ordered by name.
pub async fn find_all(pool: &PgPool, filter: &CompanyFilter) -> Result<Vec<CompanyRow>, DbError> {
    let rows = select_statement(filter)?.fetch_all(pool).await?;
    Ok(rows)
}

/// Fetch a company and its jobs.
pub async fn get(pool: &PgPool, handle: &str) -> Result<CompanyDetail, DbError> {
    let company = sqlx::query_as::<_, CompanyRow>(&format!(
        "SELECT {COLUMNS} FROM companies WHERE handle = $1"
    ))
    .bind(handle)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| not_found(handle))?;

    let jobs = sqlx::query_as::<_, CompanyJobRow>(
        "SELECT id, title, salary, equity FROM jobs WHERE company_handle = $1 ORDER BY id",
    )
    .bind(handle)
    .fetch_all(pool)
    .await?;

    Ok(CompanyDetail { company, jobs })
}

/// Apply a partial update.
///
/// Returns `DbError::Query(EmptyUpdate)` for an empty patch and
/// `DbError::NotFound` if no such company exists.
pub async fn update(pool: &PgPool, handle: &str, patch: CompanyPatch) -> Result<CompanyRow, DbError> {
    let row = update_statement(handle, patch)?
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(handle))?;

    debug!(handle, "company updated");
    Ok(row)
}

/// Delete a company (and, by cascade, its jobs).
pub async fn remove(pool: &PgPool, handle: &str) -> Result<(), DbError> {
    sqlx::query_scalar::<_, String>("DELETE FROM companies WHERE handle = $1 RETURNING handle")
        .bind(handle)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(handle))?;

    debug!(handle, "company removed");
    Ok(())
}
