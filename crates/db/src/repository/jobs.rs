//! Job CRUD operations.
//!
//! Jobs have no uniqueness constraint in the schema. `create_job` rejects a
//! second job with the same title at the same company through a lookup before
//! the insert, which two concurrent requests can both pass.

use rust_decimal::Decimal;
use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::debug;

use crate::{
    error::is_foreign_key_violation,
    models::{Company, Job, JobDetail, JobFilter, NewJob},
    sql::{value::bind_values, PartialUpdate, Predicate, SelectQuery, JOB_FIELDS},
    DbError,
};

const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

fn unknown_company(err: sqlx::Error, handle: Option<&str>) -> DbError {
    if !is_foreign_key_violation(&err) {
        return err.into();
    }
    match handle {
        Some(handle) => DbError::bad_request(format!("No company: {handle}")),
        None => DbError::bad_request("No such company"),
    }
}

/// Insert a new job posting.
///
/// Returns `DbError::BadRequest` if the company already has a job with this
/// title, or if the company does not exist.
pub async fn create_job(pool: &PgPool, new: &NewJob) -> Result<Job, DbError> {
    let duplicate = sqlx::query_scalar::<_, i32>(
        "SELECT id FROM jobs WHERE title = $1 AND company_handle = $2 LIMIT 1",
    )
    .bind(&new.title)
    .bind(&new.company_handle)
    .fetch_optional(pool)
    .await?;

    if duplicate.is_some() {
        return Err(DbError::bad_request(format!(
            "Duplicate job: {} at {}",
            new.title, new.company_handle
        )));
    }

    let sql = format!(
        "INSERT INTO jobs (title, salary, equity, company_handle) \
         VALUES ($1, $2, $3, $4) \
         RETURNING {JOB_COLUMNS}"
    );
    let row = sqlx::query_as::<_, Job>(&sql)
        .bind(&new.title)
        .bind(new.salary)
        .bind(new.equity)
        .bind(&new.company_handle)
        .fetch_one(pool)
        .await
        .map_err(|e| unknown_company(e, Some(&new.company_handle)))?;

    Ok(row)
}

/// Build the listing query for `filter` without running it.
pub fn job_listing(filter: &JobFilter) -> SelectQuery {
    SelectQuery::new(format!("SELECT {JOB_COLUMNS} FROM jobs"))
        .filter_opt(filter.title.as_deref().map(|s| Predicate::contains("title", s)))
        .filter_opt(filter.min_salary.map(|n| Predicate::gte("salary", n)))
        .filter_opt(filter.has_equity.then(|| Predicate::gt("equity", Decimal::ZERO)))
        .order_by("title")
}

/// Return every job matching `filter`, ordered by title.
pub async fn list_jobs(pool: &PgPool, filter: &JobFilter) -> Result<Vec<Job>, DbError> {
    let (sql, values) = job_listing(filter).into_parts();
    debug!(%sql, params = values.len(), "listing jobs");

    let rows = bind_values(sqlx::query_as::<_, Job>(&sql), values)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Fetch a job by id, with the company that posted it.
///
/// Returns `DbError::NotFound` if no such job exists.
pub async fn get_job(pool: &PgPool, id: i32) -> Result<JobDetail, DbError> {
    let sql = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
    let job = sqlx::query_as::<_, Job>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DbError::not_found(format!("No job: {id}")))?;

    let company = sqlx::query_as::<_, Company>(
        "SELECT c.handle, c.name, c.description, c.num_employees, c.logo_url \
         FROM companies c JOIN jobs j ON j.company_handle = c.handle \
         WHERE j.id = $1",
    )
    .bind(job.id)
    .fetch_optional(pool)
    .await?
    // The job vanished between the two reads.
    .ok_or_else(|| DbError::not_found(format!("No job: {id}")))?;

    Ok(JobDetail { job, company })
}

/// Apply a partial update. Only the keys present in `data` change.
///
/// Accepted keys: `title`, `salary`, `equity`, `companyHandle`.
/// Returns `DbError::NotFound` if the id does not exist.
pub async fn update_job(pool: &PgPool, id: i32, data: &Map<String, Value>) -> Result<Job, DbError> {
    let update = PartialUpdate::build(data, &JOB_FIELDS)?;
    let id_idx = update.next_placeholder();
    let sql = format!(
        "UPDATE jobs SET {} WHERE id = ${id_idx} RETURNING {JOB_COLUMNS}",
        update.set_cols
    );
    debug!(%sql, "updating job");

    let new_handle = data.get("companyHandle").and_then(Value::as_str);
    let row = bind_values(sqlx::query_as::<_, Job>(&sql), update.values)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| unknown_company(e, new_handle))?
        .ok_or_else(|| DbError::not_found(format!("No job: {id}")))?;

    Ok(row)
}

/// Permanently delete a job.
///
/// Returns `DbError::NotFound` if no row was deleted.
pub async fn remove_job(pool: &PgPool, id: i32) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found(format!("No job: {id}")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::SqlValue;

    #[test]
    fn unfiltered_listing_is_ordered_by_title() {
        let sql = job_listing(&JobFilter::default()).render();
        assert_eq!(
            sql,
            "SELECT id, title, salary, equity, company_handle FROM jobs ORDER BY title"
        );
    }

    #[test]
    fn has_equity_false_adds_no_predicate() {
        let filter = JobFilter {
            has_equity: false,
            ..Default::default()
        };
        assert!(job_listing(&filter).predicates().is_empty());
    }

    #[test]
    fn has_equity_alone_still_gets_a_where_clause() {
        let filter = JobFilter {
            has_equity: true,
            ..Default::default()
        };
        let (sql, values) = job_listing(&filter).into_parts();
        assert!(sql.ends_with("FROM jobs WHERE equity > $1 ORDER BY title"));
        assert_eq!(values, vec![SqlValue::from(Decimal::ZERO)]);
    }

    #[test]
    fn all_criteria_are_applied_in_order() {
        let filter = JobFilter {
            title: Some("Engineer".into()),
            min_salary: Some(90_000),
            has_equity: true,
        };
        let (sql, values) = job_listing(&filter).into_parts();
        assert!(sql.ends_with(
            "WHERE title ILIKE $1 AND salary >= $2 AND equity > $3 ORDER BY title"
        ));
        assert_eq!(values.len(), 3);
        assert_eq!(values[0], SqlValue::from("%Engineer%"));
    }
}
