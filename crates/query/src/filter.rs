//! `WHERE` fragments for the company and job search endpoints.
//!
//! Each builder lists its candidate predicates in a fixed order and folds
//! them into a single [`SqlFragment`]. Only predicates that bind a value
//! advance the placeholder index; literal predicates are spliced in as-is.
//! The output never includes the `WHERE` keyword and is empty when no
//! criteria were supplied.

use crate::{CompanyFilter, JobFilter, QueryError, SqlFragment, SqlValue};

/// One candidate predicate.
enum Predicate {
    /// Renders itself around the placeholder index it is given.
    Bound {
        render: fn(usize) -> String,
        value: SqlValue,
    },
    /// Fixed text, consumes no placeholder.
    Literal(&'static str),
}

/// Number the predicates from `$1` and join them with `AND`.
fn assemble(predicates: Vec<Predicate>) -> SqlFragment {
    let (clauses, ordered_values, _) = predicates.into_iter().fold(
        (Vec::new(), Vec::new(), 1usize),
        |(mut clauses, mut values, next), predicate| match predicate {
            Predicate::Bound { render, value } => {
                clauses.push(render(next));
                values.push(value);
                (clauses, values, next + 1)
            }
            Predicate::Literal(text) => {
                clauses.push(text.to_owned());
                (clauses, values, next)
            }
        },
    );

    SqlFragment {
        clause_text: clauses.join(" AND "),
        ordered_values,
    }
}

/// Free-text criteria: an empty string constrains nothing.
fn search_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Build the `WHERE` fragment for a company search.
///
/// Predicate order: name substring, minimum employees, maximum employees.
///
/// # Errors
/// [`QueryError::InvalidRange`] when both bounds are given and
/// `min_employees > max_employees`.
pub fn build_company_filter_fragment(filter: &CompanyFilter) -> Result<SqlFragment, QueryError> {
    if let (Some(min), Some(max)) = (filter.min_employees, filter.max_employees) {
        if min > max {
            return Err(QueryError::InvalidRange { min, max });
        }
    }

    let mut predicates = Vec::with_capacity(3);

    if let Some(name) = search_text(&filter.name_like) {
        predicates.push(Predicate::Bound {
            render: |i| format!("name ILIKE '%' || ${i} || '%'"),
            value: SqlValue::from(name),
        });
    }
    if let Some(min) = filter.min_employees {
        predicates.push(Predicate::Bound {
            render: |i| format!("num_employees >= ${i}"),
            value: SqlValue::from(min),
        });
    }
    if let Some(max) = filter.max_employees {
        predicates.push(Predicate::Bound {
            render: |i| format!("num_employees <= ${i}"),
            value: SqlValue::from(max),
        });
    }

    Ok(assemble(predicates))
}

/// Build the `WHERE` fragment for a job search.
///
/// Predicate order: title substring, minimum salary, equity. Equity is a
/// literal `equity > 0` emitted only for `has_equity == Some(true)`.
pub fn build_job_filter_fragment(filter: &JobFilter) -> SqlFragment {
    let mut predicates = Vec::with_capacity(3);

    if let Some(title) = search_text(&filter.title) {
        predicates.push(Predicate::Bound {
            render: |i| format!("title ILIKE '%' || ${i} || '%'"),
            value: SqlValue::from(title),
        });
    }
    if let Some(min) = filter.min_salary {
        predicates.push(Predicate::Bound {
            render: |i| format!("salary >= ${i}"),
            value: SqlValue::from(min),
        });
    }
    if filter.has_equity == Some(true) {
        predicates.push(Predicate::Literal("equity > 0"));
    }

    assemble(predicates)
}
