//! `query` crate: parameterized SQL fragment builders.
//!
//! Turns sparse update maps and per-entity filter criteria into `SET` /
//! `WHERE` clause text plus the positional values bound to its `$n`
//! placeholders. Everything here is pure: no I/O, no logging, no shared state.

pub mod criteria;
pub mod error;
pub mod filter;
pub mod fragment;
pub mod value;

pub use criteria::{CompanyFilter, JobFilter};
pub use error::QueryError;
pub use filter::{build_company_filter_fragment, build_job_filter_fragment};
pub use fragment::{build_update_fragment, FieldMap, SqlFragment};
pub use value::SqlValue;
