//! Request shapes that are not stored rows.
//!
//! Partial-update bodies are kept as an ordered JSON object for the `SET`
//! builder, but are first checked against their typed counterpart. Query
//! strings are deserialised straight into typed, validated search structs.

use db::models::{CompanyFilter, JobFilter};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use validator::Validate;

use crate::error::ApiError;

/// Check a partial-update body against `T` (e.g. `CompanyUpdate`).
///
/// Unknown keys, `null` on required fields and wrong JSON types fail
/// deserialisation; value rules come from `T`'s `Validate` impl. An empty
/// body passes here and is rejected when the update is built.
pub fn validate_update<T>(data: &Map<String, Value>) -> Result<(), ApiError>
where
    T: DeserializeOwned + Validate,
{
    let update: T = serde_json::from_value(Value::Object(data.clone()))
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    update.validate()?;
    Ok(())
}

/// `GET /companies` query string.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanySearchQuery {
    #[validate(range(min = 0, message = "minEmployees must be a non-negative integer"))]
    pub min_employees: Option<i32>,
    #[validate(range(min = 0, message = "maxEmployees must be a non-negative integer"))]
    pub max_employees: Option<i32>,
    pub name: Option<String>,
}

impl CompanySearchQuery {
    pub fn into_filter(self) -> Result<CompanyFilter, ApiError> {
        self.validate()?;
        Ok(CompanyFilter {
            min_employees: self.min_employees,
            max_employees: self.max_employees,
            name: self.name,
        })
    }
}

/// `GET /jobs` query string.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobSearchQuery {
    pub title: Option<String>,
    #[validate(range(min = 0, message = "minSalary must be a non-negative integer"))]
    pub min_salary: Option<i32>,
    pub has_equity: Option<String>,
}

impl JobSearchQuery {
    /// `hasEquity` is true only for the literal string `true`.
    pub fn into_filter(self) -> Result<JobFilter, ApiError> {
        self.validate()?;
        Ok(JobFilter {
            title: self.title,
            min_salary: self.min_salary,
            has_equity: self.has_equity.as_deref() == Some("true"),
        })
    }
}
