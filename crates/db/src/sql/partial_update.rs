//! `SET`-clause generation for partial updates.
//!
//! Given `{"numEmployees": 10, "name": "Acme"}` and the company registry this
//! produces:
//!
//! ```text
//! set_cols = "num_employees"=$1, "name"=$2
//! values   = [Int(10), Text("Acme")]
//! ```
//!
//! Placeholders are numbered from 1 in the order the payload lists its keys.
//! Callers bind any extra parameter (the row key) at
//! [`PartialUpdate::next_placeholder`].

use serde_json::{Map, Value};

use crate::{
    sql::{fields::FieldRegistry, value::SqlValue},
    DbError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate {
    /// `"<col1>"=$1, "<col2>"=$2, ...`
    pub set_cols: String,
    /// Bind values, parallel to the placeholders in `set_cols`.
    pub values: Vec<SqlValue>,
}

impl PartialUpdate {
    /// Build the `SET` fragment for `data`.
    ///
    /// # Errors
    /// - [`DbError::BadRequest`] when `data` is empty, names a field the
    ///   registry does not know, or holds a value of the wrong type.
    pub fn build(data: &Map<String, Value>, registry: &FieldRegistry) -> Result<Self, DbError> {
        if data.is_empty() {
            return Err(DbError::bad_request("No data"));
        }

        let mut cols = Vec::with_capacity(data.len());
        let mut values = Vec::with_capacity(data.len());

        for (name, value) in data {
            let field = registry.get(name).ok_or_else(|| {
                DbError::bad_request(format!(
                    "{name} is not an updatable {} field",
                    registry.entity()
                ))
            })?;
            values.push(SqlValue::from_json(field.kind, name, value)?);
            cols.push(format!("\"{}\"=${}", field.column_name(), values.len()));
        }

        Ok(Self {
            set_cols: cols.join(", "),
            values,
        })
    }

    /// Index of the first placeholder free for the caller's own parameters.
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}
