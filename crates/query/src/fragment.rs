//! Partial-update fragments.
//!
//! [`build_update_fragment`] renders the `SET` list of an `UPDATE` statement.
//! The caller owns the rest of the statement: it appends its own trailing
//! predicate at [`SqlFragment::next_placeholder`] and pushes the identifying
//! value last, so numbering stays contiguous.

use crate::{QueryError, SqlValue};

// ---------------------------------------------------------------------------
// SqlFragment
// ---------------------------------------------------------------------------

/// A partial clause plus the values for its `$1..$n` placeholders.
///
/// Every placeholder in `clause_text` has exactly one entry in
/// `ordered_values`, numbered from 1 without gaps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlFragment {
    pub clause_text: String,
    pub ordered_values: Vec<SqlValue>,
}

impl SqlFragment {
    /// `true` when no predicate or assignment was emitted.
    pub fn is_empty(&self) -> bool {
        self.clause_text.is_empty()
    }

    /// Index the caller should use for the first placeholder it appends.
    pub fn next_placeholder(&self) -> usize {
        self.ordered_values.len() + 1
    }
}

// ---------------------------------------------------------------------------
// FieldMap
// ---------------------------------------------------------------------------

/// Logical field name -> new value, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    entries: Vec<(String, SqlValue)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`.
    ///
    /// Re-setting an existing key replaces its value in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<SqlValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style [`FieldMap::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl IntoIterator for FieldMap {
    type Item = (String, SqlValue);
    type IntoIter = std::vec::IntoIter<(String, SqlValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// ---------------------------------------------------------------------------
// SET fragment
// ---------------------------------------------------------------------------

/// Physical column for `field`, falling back to the field name itself.
fn column_for<'a>(aliases: &[(&'a str, &'a str)], field: &'a str) -> &'a str {
    aliases
        .iter()
        .find(|(logical, _)| *logical == field)
        .map(|(_, physical)| *physical)
        .unwrap_or(field)
}

/// Double-quote an identifier, doubling any embedded quotes.
fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Build the `SET` list for a partial update.
///
/// `aliases` maps logical field names to column names; unlisted fields are
/// used verbatim. Values pass through untouched, nulls included.
///
/// # Errors
/// [`QueryError::EmptyUpdate`] if `fields` is empty.
pub fn build_update_fragment(
    fields: FieldMap,
    aliases: &[(&str, &str)],
) -> Result<SqlFragment, QueryError> {
    if fields.is_empty() {
        return Err(QueryError::EmptyUpdate);
    }

    let mut assignments = Vec::with_capacity(fields.len());
    let mut ordered_values = Vec::with_capacity(fields.len());

    for (idx, (field, value)) in fields.into_iter().enumerate() {
        let column = quote_ident(column_for(aliases, &field));
        assignments.push(format!("{column}=${}", idx + 1));
        ordered_values.push(value);
    }

    Ok(SqlFragment {
        clause_text: assignments.join(", "),
        ordered_values,
    })
}
