//! Row structs that map 1-to-1 onto database tables.
//!
//! Columns are read by their snake_case names and serialised with the
//! camelCase names the HTTP API exposes, so a row is already in its public
//! shape once it is fetched. Input structs carry their field rules as
//! `validator` attributes.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use url::Url;
use validator::{Validate, ValidationError};

// ---------------------------------------------------------------------------
// companies
// ---------------------------------------------------------------------------

/// A company's public fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A job as listed under its company (the handle is implied).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CompanyJob {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

/// A company together with its jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<CompanyJob>,
}

/// Input for creating a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    #[validate(custom(function = "validate_handle", message = "handle must be 1-25 lowercase letters, digits or dashes"))]
    pub handle: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub description: String,
    #[validate(range(min = 0, message = "numEmployees must be greater than or equal to 0"))]
    pub num_employees: Option<i32>,
    #[validate(
        url(message = "logoUrl must be a URL"),
        custom(function = "validate_web_scheme", message = "logoUrl must be an http(s) URL")
    )]
    pub logo_url: Option<String>,
}

/// Partial update of a company. Absent keys stay untouched; `numEmployees`
/// and `logoUrl` may be cleared with `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyUpdate {
    #[serde(default, deserialize_with = "present")]
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<String>,
    #[validate(range(min = 0, message = "numEmployees must be greater than or equal to 0"))]
    pub num_employees: Option<i32>,
    #[validate(
        url(message = "logoUrl must be a URL"),
        custom(function = "validate_web_scheme", message = "logoUrl must be an http(s) URL")
    )]
    pub logo_url: Option<String>,
}

/// Listing criteria for companies. Every criterion is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyFilter {
    /// Inclusive lower bound on `num_employees`.
    pub min_employees: Option<i32>,
    /// Inclusive upper bound on `num_employees`.
    pub max_employees: Option<i32>,
    /// Case-insensitive substring of `name`.
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// jobs
// ---------------------------------------------------------------------------

/// A job's public fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// A job together with the company that posted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDetail {
    #[serde(flatten)]
    pub job: Job,
    pub company: Company,
}

/// Input for creating a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(range(min = 0, message = "salary must be greater than or equal to 0"))]
    pub salary: Option<i32>,
    #[validate(custom(function = "validate_equity", message = "equity must be between 0 and 1"))]
    pub equity: Option<Decimal>,
    #[validate(custom(function = "validate_handle", message = "companyHandle must be 1-25 lowercase letters, digits or dashes"))]
    pub company_handle: String,
}

/// Partial update of a job. `salary` and `equity` may be cleared with `null`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdate {
    #[serde(default, deserialize_with = "present")]
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(range(min = 0, message = "salary must be greater than or equal to 0"))]
    pub salary: Option<i32>,
    #[validate(custom(function = "validate_equity", message = "equity must be between 0 and 1"))]
    pub equity: Option<Decimal>,
    #[serde(default, deserialize_with = "present")]
    #[validate(custom(function = "validate_handle", message = "companyHandle must be 1-25 lowercase letters, digits or dashes"))]
    pub company_handle: Option<String>,
}

/// Listing criteria for jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    /// Case-insensitive substring of `title`.
    pub title: Option<String>,
    /// Inclusive lower bound on `salary`.
    pub min_salary: Option<i32>,
    /// When set, only jobs with a positive equity share. `false` does not filter.
    pub has_equity: bool,
}

// ---------------------------------------------------------------------------
// field rules
// ---------------------------------------------------------------------------

/// A key that is present must carry a value; `null` is rejected.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn validate_handle(handle: &str) -> Result<(), ValidationError> {
    let well_formed = !handle.is_empty()
        && handle.len() <= 25
        && handle
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("handle"))
    }
}

/// Non-URLs are left to the `url` rule.
fn validate_web_scheme(value: &str) -> Result<(), ValidationError> {
    match Url::parse(value) {
        Ok(url) if !matches!(url.scheme(), "http" | "https") => {
            Err(ValidationError::new("scheme"))
        }
        _ => Ok(()),
    }
}

fn validate_equity(equity: &Decimal) -> Result<(), ValidationError> {
    if *equity < Decimal::ZERO || *equity > Decimal::ONE {
        Err(ValidationError::new("equity"))
    } else {
        Ok(())
    }
}
