//! Company CRUD operations.

use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::debug;

use crate::{
    error::{is_unique_violation, violated_constraint},
    models::{Company, CompanyDetail, CompanyFilter, CompanyJob, NewCompany},
    sql::{value::bind_values, PartialUpdate, Predicate, SelectQuery, COMPANY_FIELDS},
    DbError,
};

const COMPANY_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

/// Map a unique violation raised by an insert/update to a caller-facing error.
fn duplicate_company(err: sqlx::Error, handle: &str) -> DbError {
    if !is_unique_violation(&err) {
        return err.into();
    }
    match violated_constraint(&err) {
        Some("companies_name_key") => DbError::bad_request("Duplicate company name"),
        _ => DbError::bad_request(format!("Duplicate company: {handle}")),
    }
}

/// Insert a new company.
///
/// Returns `DbError::BadRequest` if the handle is already taken. The check
/// runs before the insert; a concurrent insert of the same handle is caught by
/// the primary key and reported the same way.
pub async fn create_company(pool: &PgPool, new: &NewCompany) -> Result<Company, DbError> {
    let existing = sqlx::query_scalar::<_, String>("SELECT handle FROM companies WHERE handle = $1")
        .bind(&new.handle)
        .fetch_optional(pool)
        .await?;

    if existing.is_some() {
        return Err(DbError::bad_request(format!("Duplicate company: {}", new.handle)));
    }

    let sql = format!(
        "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING {COMPANY_COLUMNS}"
    );
    let row = sqlx::query_as::<_, Company>(&sql)
        .bind(&new.handle)
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.num_employees)
        .bind(&new.logo_url)
        .fetch_one(pool)
        .await
        .map_err(|e| duplicate_company(e, &new.handle))?;

    Ok(row)
}

/// Build the listing query for `filter` without running it.
///
/// # Errors
/// [`DbError::BadRequest`] when both bounds are given and `min > max`.
pub fn company_listing(filter: &CompanyFilter) -> Result<SelectQuery, DbError> {
    if let (Some(min), Some(max)) = (filter.min_employees, filter.max_employees) {
        if min > max {
            return Err(DbError::bad_request(
                "Min employees cannot be greater than max employees",
            ));
        }
    }

    let query = SelectQuery::new(format!("SELECT {COMPANY_COLUMNS} FROM companies"))
        .filter_opt(filter.min_employees.map(|n| Predicate::gte("num_employees", n)))
        .filter_opt(filter.max_employees.map(|n| Predicate::lte("num_employees", n)))
        .filter_opt(filter.name.as_deref().map(|s| Predicate::contains("name", s)))
        .order_by("name");

    Ok(query)
}

/// Return every company matching `filter`, ordered by name.
pub async fn list_companies(pool: &PgPool, filter: &CompanyFilter) -> Result<Vec<Company>, DbError> {
    let (sql, values) = company_listing(filter)?.into_parts();
    debug!(%sql, params = values.len(), "listing companies");

    let rows = bind_values(sqlx::query_as::<_, Company>(&sql), values)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Fetch a company by handle, with its jobs.
///
/// Returns `DbError::NotFound` if no such company exists.
pub async fn get_company(pool: &PgPool, handle: &str) -> Result<CompanyDetail, DbError> {
    let sql = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE handle = $1");
    let company = sqlx::query_as::<_, Company>(&sql)
        .bind(handle)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DbError::not_found(format!("No company: {handle}")))?;

    let jobs = sqlx::query_as::<_, CompanyJob>(
        "SELECT id, title, salary, equity FROM jobs WHERE company_handle = $1 ORDER BY id",
    )
    .bind(&company.handle)
    .fetch_all(pool)
    .await?;

    Ok(CompanyDetail { company, jobs })
}

/// Apply a partial update. Only the keys present in `data` change.
///
/// Accepted keys: `name`, `description`, `numEmployees`, `logoUrl`.
/// Returns `DbError::NotFound` if the handle does not exist.
pub async fn update_company(
    pool: &PgPool,
    handle: &str,
    data: &Map<String, Value>,
) -> Result<Company, DbError> {
    let update = PartialUpdate::build(data, &COMPANY_FIELDS)?;
    let handle_idx = update.next_placeholder();
    let sql = format!(
        "UPDATE companies SET {} WHERE handle = ${handle_idx} RETURNING {COMPANY_COLUMNS}",
        update.set_cols
    );
    debug!(%sql, "updating company");

    let row = bind_values(sqlx::query_as::<_, Company>(&sql), update.values)
        .bind(handle)
        .fetch_optional(pool)
        .await
        .map_err(|e| duplicate_company(e, handle))?
        .ok_or_else(|| DbError::not_found(format!("No company: {handle}")))?;

    Ok(row)
}

/// Permanently delete a company (and, by cascade, its jobs).
///
/// Returns `DbError::NotFound` if no row was deleted.
pub async fn remove_company(pool: &PgPool, handle: &str) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM companies WHERE handle = $1")
        .bind(handle)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found(format!("No company: {handle}")));
    }

    Ok(())
}
