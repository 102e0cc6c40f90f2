//! Full statements assembled from builder fragments.
//!
//! A [`Statement`] is SQL text plus the values for its `$n` placeholders.
//! Construction is pure so the glue around a fragment (the `WHERE` keyword,
//! the trailing key predicate and its index) can be tested without a
//! database; the `fetch_*` methods bind the values and run it.

use query::{SqlFragment, SqlValue};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgPool, Postgres};

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

impl Statement {
    /// `<base> [WHERE <filter>] <tail>`; the `WHERE` keyword is dropped when
    /// the filter fragment is empty.
    pub fn filtered(base: &str, filter: SqlFragment, tail: &str) -> Self {
        let sql = if filter.is_empty() {
            format!("{base} {tail}")
        } else {
            format!("{base} WHERE {} {tail}", filter.clause_text)
        };
        Self {
            sql,
            values: filter.ordered_values,
        }
    }

    /// `UPDATE <table> SET <set> WHERE <key_column> = $<n+1> RETURNING <returning>`
    /// with `key` bound last.
    pub fn update(
        table: &str,
        set: SqlFragment,
        key_column: &str,
        key: impl Into<SqlValue>,
        returning: &str,
    ) -> Self {
        let key_idx = set.next_placeholder();
        let sql = format!(
            "UPDATE {table} SET {} WHERE {key_column} = ${key_idx} RETURNING {returning}",
            set.clause_text
        );
        let mut values = set.ordered_values;
        values.push(key.into());
        Self { sql, values }
    }

    pub async fn fetch_all<O>(self, pool: &PgPool) -> Result<Vec<O>, sqlx::Error>
    where
        O: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let Statement { sql, values } = self;
        bind_values(sqlx::query_as::<_, O>(&sql), values)
            .fetch_all(pool)
            .await
    }

    pub async fn fetch_optional<O>(self, pool: &PgPool) -> Result<Option<O>, sqlx::Error>
    where
        O: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let Statement { sql, values } = self;
        bind_values(sqlx::query_as::<_, O>(&sql), values)
            .fetch_optional(pool)
            .await
    }
}

fn bind_values<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    values: Vec<SqlValue>,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for value in values {
        query = match value {
            SqlValue::Text(v) => query.bind(v),
            SqlValue::Int(v) => query.bind(v),
            SqlValue::Numeric(v) => query.bind(v),
            SqlValue::Bool(v) => query.bind(v),
        };
    }
    query
}
