//! Row structs that map 1-to-1 onto database tables, plus the insert and
//! patch payloads the repositories accept.
//!
//! Rows serialise with camelCase keys, which is the shape the HTTP API
//! returns. Patches turn themselves into a [`FieldMap`] keyed by the same
//! camelCase names; each repository supplies the column aliases.

use query::FieldMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use crate::DbError;

/// Distinguish an explicit `null` (`Some(None)`) from an absent key (`None`).
fn nullable<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

fn bad_request(msg: impl Into<String>) -> DbError {
    DbError::BadRequest(msg.into())
}

/// A patched field whose column is `NOT NULL`: `null` is rejected.
fn required<'a, T>(field: &str, value: &'a Option<Option<T>>) -> Result<Option<&'a T>, DbError> {
    match value {
        Some(None) => Err(bad_request(format!("{field} cannot be null"))),
        Some(Some(v)) => Ok(Some(v)),
        None => Ok(None),
    }
}

fn check_max_chars(field: &str, value: &str, max: usize) -> Result<(), DbError> {
    if value.chars().count() > max {
        return Err(bad_request(format!("{field} must be at most {max} characters")));
    }
    Ok(())
}

fn check_non_empty(field: &str, value: &str) -> Result<(), DbError> {
    if value.trim().is_empty() {
        return Err(bad_request(format!("{field} must not be empty")));
    }
    Ok(())
}

fn check_non_negative(field: &str, value: Option<i32>) -> Result<(), DbError> {
    match value {
        Some(v) if v < 0 => Err(bad_request(format!("{field} must be >= 0"))),
        _ => Ok(()),
    }
}

fn check_equity(value: Option<Decimal>) -> Result<(), DbError> {
    match value {
        Some(v) if v < Decimal::ZERO || v > Decimal::ONE => {
            Err(bad_request("equity must be between 0 and 1"))
        }
        _ => Ok(()),
    }
}

fn check_email(value: &str) -> Result<(), DbError> {
    match value.find('@') {
        Some(pos) if pos > 0 && pos + 1 < value.len() => Ok(()),
        _ => Err(bad_request("email must be a valid address")),
    }
}

// ---------------------------------------------------------------------------
// companies
// ---------------------------------------------------------------------------

/// A persisted company row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRow {
    pub handle: String,
    pub name: String,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A job as listed under its company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CompanyJobRow {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

/// A company together with its jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: CompanyRow,
    pub jobs: Vec<CompanyJobRow>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl NewCompany {
    pub fn validate(&self) -> Result<(), DbError> {
        check_non_empty("handle", &self.handle)?;
        check_max_chars("handle", &self.handle, 25)?;
        if self.handle != self.handle.to_lowercase() {
            return Err(bad_request("handle must be lowercase"));
        }
        check_non_empty("name", &self.name)?;
        check_non_negative("numEmployees", self.num_employees)
    }
}

/// Partial update of a company. The handle is immutable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub num_employees: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub logo_url: Option<Option<String>>,
}

impl CompanyPatch {
    pub fn validate(&self) -> Result<(), DbError> {
        if let Some(name) = required("name", &self.name)? {
            check_non_empty("name", name)?;
        }
        check_non_negative("numEmployees", self.num_employees.flatten())
    }

    pub fn into_field_map(self) -> FieldMap {
        let mut fields = FieldMap::new();
        if let Some(Some(v)) = self.name {
            fields.set("name", v);
        }
        if let Some(v) = self.description {
            fields.set("description", v);
        }
        if let Some(v) = self.num_employees {
            fields.set("numEmployees", v);
        }
        if let Some(v) = self.logo_url {
            fields.set("logoUrl", v);
        }
        fields
    }
}

// ---------------------------------------------------------------------------
// jobs
// ---------------------------------------------------------------------------

/// A persisted job row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobRow {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl NewJob {
    pub fn validate(&self) -> Result<(), DbError> {
        check_non_empty("title", &self.title)?;
        check_non_empty("companyHandle", &self.company_handle)?;
        check_non_negative("salary", self.salary)?;
        check_equity(self.equity)
    }
}

/// Partial update of a job. A job cannot move to another company, so
/// `companyHandle` is rejected as an unknown field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub equity: Option<Option<Decimal>>,
}

impl JobPatch {
    pub fn validate(&self) -> Result<(), DbError> {
        if let Some(title) = required("title", &self.title)? {
            check_non_empty("title", title)?;
        }
        check_non_negative("salary", self.salary.flatten())?;
        check_equity(self.equity.flatten())
    }

    pub fn into_field_map(self) -> FieldMap {
        let mut fields = FieldMap::new();
        if let Some(Some(v)) = self.title {
            fields.set("title", v);
        }
        if let Some(v) = self.salary {
            fields.set("salary", v);
        }
        if let Some(v) = self.equity {
            fields.set("equity", v);
        }
        fields
    }
}

// ---------------------------------------------------------------------------
// users
// ---------------------------------------------------------------------------

/// A persisted user row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub is_admin: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), DbError> {
        check_non_empty("username", &self.username)?;
        check_max_chars("username", &self.username, 25)?;
        check_non_empty("firstName", &self.first_name)?;
        check_non_empty("lastName", &self.last_name)?;
        check_email(&self.email)
    }
}

/// Partial update of a user. The username is immutable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserPatch {
    #[serde(default, deserialize_with = "nullable")]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub is_admin: Option<Option<bool>>,
}

impl UserPatch {
    pub fn validate(&self) -> Result<(), DbError> {
        if let Some(v) = required("firstName", &self.first_name)? {
            check_non_empty("firstName", v)?;
        }
        if let Some(v) = required("lastName", &self.last_name)? {
            check_non_empty("lastName", v)?;
        }
        if let Some(v) = required("email", &self.email)? {
            check_email(v)?;
        }
        required("isAdmin", &self.is_admin)?;
        Ok(())
    }

    pub fn into_field_map(self) -> FieldMap {
        let mut fields = FieldMap::new();
        if let Some(Some(v)) = self.first_name {
            fields.set("firstName", v);
        }
        if let Some(Some(v)) = self.last_name {
            fields.set("lastName", v);
        }
        if let Some(Some(v)) = self.email {
            fields.set("email", v);
        }
        if let Some(Some(v)) = self.is_admin {
            fields.set("isAdmin", v);
        }
        fields
    }
}
