//! Search criteria accepted by the list endpoints.
//!
//! Each struct is a closed set of optional filters. A field counts as
//! supplied when it is `Some`, whatever its value; see the builders in
//! [`crate::filter`] for how each one is turned into a predicate.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Companies
// ---------------------------------------------------------------------------

/// Filters for `GET /companies`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyFilter {
    /// Case-insensitive substring of the company name.
    pub name_like: Option<String>,
    /// Inclusive lower bound on `num_employees`.
    pub min_employees: Option<i32>,
    /// Inclusive upper bound on `num_employees`.
    pub max_employees: Option<i32>,
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

/// Filters for `GET /jobs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    /// Case-insensitive substring of the job title.
    pub title: Option<String>,
    /// Inclusive lower bound on `salary`.
    pub min_salary: Option<i32>,
    /// `true` restricts to jobs with non-zero equity; `false` or absent
    /// lists every job.
    pub has_equity: Option<bool>,
}
