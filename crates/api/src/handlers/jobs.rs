use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::{json, Map, Value};
use tracing::info;
use validator::Validate;

use super::AppState;
use crate::{
    auth::AdminUser,
    error::ApiError,
    schemas::{validate_update, JobSearchQuery},
};
use db::{
    models::{Job, JobUpdate, NewJob},
    repository::jobs as job_repo,
};

/// `GET /jobs?title&minSalary&hasEquity` — a bare JSON array.
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<JobSearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Job>>, ApiError> {
    let Query(query) = query?;
    let filter = query.into_filter()?;

    let jobs = job_repo::list_jobs(&state.pool, &filter).await?;
    Ok(Json(jobs))
}

/// `GET /jobs/{id}` — includes the posting company.
pub async fn get(
    id: Result<Path<i32>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let job = job_repo::get_job(&state.pool, id).await?;
    Ok(Json(json!({ "job": job })))
}

/// `POST /jobs` (admin)
pub async fn create(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<NewJob>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(new) = payload?;
    new.validate()?;

    let job = job_repo::create_job(&state.pool, &new).await?;
    info!(id = job.id, company = %job.company_handle, by = %admin.sub, "job created");
    Ok((StatusCode::CREATED, Json(json!({ "newJob": job }))))
}

/// `PATCH /jobs/{id}` (admin) — partial update.
pub async fn update(
    id: Result<Path<i32>, PathRejection>,
    State(state): State<AppState>,
    _admin: AdminUser,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    let Json(data) = payload?;
    validate_update::<JobUpdate>(&data)?;

    let job = job_repo::update_job(&state.pool, id, &data).await?;
    Ok(Json(json!({ "jobEdit": job })))
}

/// `DELETE /jobs/{id}` (admin)
pub async fn delete(
    id: Result<Path<i32>, PathRejection>,
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id?;
    job_repo::remove_job(&state.pool, id).await?;
    info!(id, by = %admin.sub, "job deleted");
    Ok(Json(json!({ "msg": "Job Deleted" })))
}
