//! Repository tests against a live Postgres.
//!
//! Run with `DATABASE_URL=... cargo test -p db --features integration`.
//! `sqlx::test` creates a throwaway database per test and applies the
//! workspace migrations to it.

#![cfg(feature = "integration")]

use db::{
    models::{CompanyFilter, JobFilter, NewCompany, NewJob},
    repository::{companies, jobs},
    DbError, DbPool,
};
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};

fn company(handle: &str, name: &str, num_employees: i32) -> NewCompany {
    NewCompany {
        handle: handle.into(),
        name: name.into(),
        description: format!("Desc of {name}"),
        num_employees: Some(num_employees),
        logo_url: Some(format!("http://{handle}.img")),
    }
}

fn job(title: &str, salary: i32, equity: Option<&str>, handle: &str) -> NewJob {
    NewJob {
        title: title.into(),
        salary: Some(salary),
        equity: equity.map(|e| e.parse().unwrap()),
        company_handle: handle.into(),
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

async fn seed(pool: &DbPool) {
    companies::create_company(pool, &company("c1", "C1", 1)).await.unwrap();
    companies::create_company(pool, &company("c2", "C2", 2)).await.unwrap();
    companies::create_company(pool, &company("c3", "C3", 3)).await.unwrap();

    jobs::create_job(pool, &job("j1", 100, Some("0.1"), "c1")).await.unwrap();
    jobs::create_job(pool, &job("j2", 200, Some("0"), "c1")).await.unwrap();
    jobs::create_job(pool, &job("j3", 300, None, "c2")).await.unwrap();
}

// ============================================================
// companies
// ============================================================

#[sqlx::test(migrations = "../../migrations")]
async fn company_create_then_get_round_trips(pool: DbPool) {
    let new = company("acme", "Acme", 42);
    let created = companies::create_company(&pool, &new).await.unwrap();
    assert_eq!(created.handle, "acme");

    let fetched = companies::get_company(&pool, "acme").await.unwrap();
    assert_eq!(fetched.company.name, new.name);
    assert_eq!(fetched.company.description, new.description);
    assert_eq!(fetched.company.num_employees, new.num_employees);
    assert_eq!(fetched.company.logo_url, new.logo_url);
    assert!(fetched.jobs.is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn duplicate_company_handle_is_bad_request(pool: DbPool) {
    let new = company("acme", "Acme", 42);
    companies::create_company(&pool, &new).await.unwrap();

    let err = companies::create_company(&pool, &new).await.unwrap_err();
    assert!(matches!(err, DbError::BadRequest(msg) if msg == "Duplicate company: acme"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn company_filters_hold_for_every_row(pool: DbPool) {
    seed(&pool).await;

    let all = companies::list_companies(&pool, &CompanyFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);

    let filter = CompanyFilter {
        min_employees: Some(2),
        ..Default::default()
    };
    let rows = companies::list_companies(&pool, &filter).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|c| c.num_employees.unwrap() >= 2));

    let filter = CompanyFilter {
        min_employees: Some(1),
        max_employees: Some(2),
        name: Some("c".into()),
    };
    let rows = companies::list_companies(&pool, &filter).await.unwrap();
    let handles: Vec<_> = rows.iter().map(|c| c.handle.as_str()).collect();
    assert_eq!(handles, vec!["c1", "c2"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn company_min_above_max_is_bad_request(pool: DbPool) {
    let filter = CompanyFilter {
        min_employees: Some(50),
        max_employees: Some(10),
        ..Default::default()
    };
    let err = companies::list_companies(&pool, &filter).await.unwrap_err();
    assert!(matches!(err, DbError::BadRequest(_)));
}

#[sqlx::test(migrations = "../../migrations")]
async fn company_get_embeds_its_jobs(pool: DbPool) {
    seed(&pool).await;

    let detail = companies::get_company(&pool, "c1").await.unwrap();
    let titles: Vec<_> = detail.jobs.iter().map(|j| j.title.as_str()).collect();
    assert_eq!(titles, vec!["j1", "j2"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn company_partial_update_keeps_omitted_fields(pool: DbPool) {
    seed(&pool).await;

    let data = object(json!({ "name": "New", "numEmployees": 10 }));
    let updated = companies::update_company(&pool, "c1", &data).await.unwrap();

    assert_eq!(updated.name, "New");
    assert_eq!(updated.num_employees, Some(10));
    assert_eq!(updated.description, "Desc of C1");
    assert_eq!(updated.logo_url.as_deref(), Some("http://c1.img"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn company_update_of_missing_handle_is_not_found(pool: DbPool) {
    let data = object(json!({ "name": "Nope" }));
    let err = companies::update_company(&pool, "nope", &data).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
}

#[sqlx::test(migrations = "../../migrations")]
async fn company_delete_then_get_is_not_found(pool: DbPool) {
    seed(&pool).await;

    companies::remove_company(&pool, "c1").await.unwrap();
    let err = companies::get_company(&pool, "c1").await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));

    let err = companies::remove_company(&pool, "c1").await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
}

// ============================================================
// jobs
// ============================================================

#[sqlx::test(migrations = "../../migrations")]
async fn job_create_then_get_round_trips(pool: DbPool) {
    seed(&pool).await;

    let new = job("manager", 60_000, Some("0.05"), "c3");
    let created = jobs::create_job(&pool, &new).await.unwrap();

    let fetched = jobs::get_job(&pool, created.id).await.unwrap();
    assert_eq!(fetched.job.title, new.title);
    assert_eq!(fetched.job.salary, new.salary);
    assert_eq!(fetched.job.equity, new.equity);
    assert_eq!(fetched.job.company_handle, new.company_handle);
    assert_eq!(fetched.company.handle, "c3");
    assert_eq!(fetched.company.name, "C3");
}

#[sqlx::test(migrations = "../../migrations")]
async fn duplicate_job_is_bad_request(pool: DbPool) {
    seed(&pool).await;

    let err = jobs::create_job(&pool, &job("j1", 1, None, "c1")).await.unwrap_err();
    assert!(matches!(err, DbError::BadRequest(_)));

    // Same title at another company is fine.
    jobs::create_job(&pool, &job("j1", 1, None, "c2")).await.unwrap();
}

#[sqlx::test(migrations = "../../migrations")]
async fn job_for_unknown_company_is_bad_request(pool: DbPool) {
    let err = jobs::create_job(&pool, &job("j1", 1, None, "ghost")).await.unwrap_err();
    assert!(matches!(err, DbError::BadRequest(msg) if msg == "No company: ghost"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn job_filters_hold_for_every_row(pool: DbPool) {
    seed(&pool).await;

    let filter = JobFilter {
        has_equity: true,
        ..Default::default()
    };
    let rows = jobs::list_jobs(&pool, &filter).await.unwrap();
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|j| j.equity.unwrap() > Decimal::ZERO));

    let filter = JobFilter {
        min_salary: Some(200),
        ..Default::default()
    };
    let rows = jobs::list_jobs(&pool, &filter).await.unwrap();
    let titles: Vec<_> = rows.iter().map(|j| j.title.as_str()).collect();
    assert_eq!(titles, vec!["j2", "j3"]);

    let filter = JobFilter {
        title: Some("J".into()),
        min_salary: Some(100),
        has_equity: false,
    };
    assert_eq!(jobs::list_jobs(&pool, &filter).await.unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../migrations")]
async fn job_partial_update_keeps_omitted_fields(pool: DbPool) {
    seed(&pool).await;
    let j1 = jobs::list_jobs(&pool, &JobFilter { title: Some("j1".into()), ..Default::default() })
        .await
        .unwrap()
        .remove(0);

    let data = object(json!({ "salary": 150, "equity": null }));
    let updated = jobs::update_job(&pool, j1.id, &data).await.unwrap();

    assert_eq!(updated.salary, Some(150));
    assert_eq!(updated.equity, None);
    assert_eq!(updated.title, "j1");
    assert_eq!(updated.company_handle, "c1");
}

#[sqlx::test(migrations = "../../migrations")]
async fn job_update_and_delete_of_missing_id_are_not_found(pool: DbPool) {
    let data = object(json!({ "title": "x" }));
    let err = jobs::update_job(&pool, 975_000, &data).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));

    let err = jobs::remove_job(&pool, 975_000).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
}

#[sqlx::test(migrations = "../../migrations")]
async fn job_delete_then_get_is_not_found(pool: DbPool) {
    seed(&pool).await;
    let id = jobs::list_jobs(&pool, &JobFilter::default()).await.unwrap()[0].id;

    jobs::remove_job(&pool, id).await.unwrap();
    let err = jobs::get_job(&pool, id).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
}
