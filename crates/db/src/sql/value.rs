//! Typed bind parameters.
//!
//! Every value carries its SQL type even when it is `NULL`, so Postgres never
//! has to guess the type of a `$n` placeholder in `SET "salary"=$1`.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::Postgres;

use crate::{sql::fields::FieldKind, DbError};

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(Option<String>),
    Int(Option<i32>),
    Decimal(Option<Decimal>),
}

impl SqlValue {
    /// Convert a JSON value supplied for `field` into a value of `kind`.
    ///
    /// JSON `null` becomes a typed SQL `NULL`. Decimals may be given either as
    /// a JSON number or as a numeric string.
    pub fn from_json(kind: FieldKind, field: &str, value: &Value) -> Result<Self, DbError> {
        let mismatch = || DbError::bad_request(format!("{field}: expected {kind}, got {value}"));

        if value.is_null() {
            return Ok(match kind {
                FieldKind::Text => Self::Text(None),
                FieldKind::Int => Self::Int(None),
                FieldKind::Decimal => Self::Decimal(None),
            });
        }

        match kind {
            FieldKind::Text => value
                .as_str()
                .map(|s| Self::Text(Some(s.to_owned())))
                .ok_or_else(mismatch),
            FieldKind::Int => value
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .map(|n| Self::Int(Some(n)))
                .ok_or_else(mismatch),
            FieldKind::Decimal => {
                let text = match value {
                    Value::Number(n) => n.to_string(),
                    Value::String(s) => s.clone(),
                    _ => return Err(mismatch()),
                };
                parse_decimal(&text)
                    .map(|d| Self::Decimal(Some(d)))
                    .ok_or_else(mismatch)
            }
        }
    }

    /// Append this value to a query's bind list.
    pub(crate) fn bind_to<'q, O>(
        self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        match self {
            Self::Text(v) => query.bind(v),
            Self::Int(v) => query.bind(v),
            Self::Decimal(v) => query.bind(v),
        }
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Bind `values` in order; their positions must match `$1..$n` in the SQL.
pub(crate) fn bind_values<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    values: Vec<SqlValue>,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    values.into_iter().fold(query, |q, v| v.bind_to(q))
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

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::Int(Some(v))
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        Self::Decimal(Some(v))
    }
}
