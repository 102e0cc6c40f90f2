//! Scalar values bound to fragment placeholders.

use rust_decimal::Decimal;

/// A single positional parameter.
///
/// Nulls stay typed so the storage layer can bind them against the right
/// column type; the builders never inspect or coerce the payload.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(Option<String>),
    Int(Option<i32>),
    Numeric(Option<Decimal>),
    Bool(Option<bool>),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        match self {
            Self::Text(v) => v.is_none(),
            Self::Int(v) => v.is_none(),
            Self::Numeric(v) => v.is_none(),
            Self::Bool(v) => v.is_none(),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(Some(v.to_owned()))
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(Some(v))
    }
}

impl From<Option<String>> for SqlValue {
    fn from(v: Option<String>) -> Self {
        Self::Text(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::Int(Some(v))
    }
}

impl From<Option<i32>> for SqlValue {
    fn from(v: Option<i32>) -> Self {
        Self::Int(v)
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        Self::Numeric(Some(v))
    }
}

impl From<Option<Decimal>> for SqlValue {
    fn from(v: Option<Decimal>) -> Self {
        Self::Numeric(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(Some(v))
    }
}

impl From<Option<bool>> for SqlValue {
    fn from(v: Option<bool>) -> Self {
        Self::Bool(v)
    }
}
