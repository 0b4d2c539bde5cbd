use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
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
    schemas::{validate_update, CompanySearchQuery},
};
use db::{
    models::{CompanyUpdate, NewCompany},
    repository::companies as company_repo,
};

/// `GET /companies?minEmployees&maxEmployees&name`
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<CompanySearchQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let filter = query.into_filter()?;

    let companies = company_repo::list_companies(&state.pool, &filter).await?;
    Ok(Json(json!({ "companies": companies })))
}

/// `GET /companies/{handle}` — includes the company's jobs.
pub async fn get(
    Path(handle): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    let company = company_repo::get_company(&state.pool, &handle).await?;
    Ok(Json(json!({ "company": company })))
}

/// `POST /companies` (admin)
pub async fn create(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<NewCompany>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(new) = payload?;
    new.validate()?;

    let company = company_repo::create_company(&state.pool, &new).await?;
    info!(handle = %company.handle, by = %admin.sub, "company created");
    Ok((StatusCode::CREATED, Json(json!({ "company": company }))))
}

/// `PATCH /companies/{handle}` (admin) — partial update.
pub async fn update(
    Path(handle): Path<String>,
    State(state): State<AppState>,
    _admin: AdminUser,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(data) = payload?;
    validate_update::<CompanyUpdate>(&data)?;

    let company = company_repo::update_company(&state.pool, &handle, &data).await?;
    Ok(Json(json!({ "company": company })))
}

/// `DELETE /companies/{handle}` (admin)
pub async fn delete(
    Path(handle): Path<String>,
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<Json<Value>, ApiError> {
    company_repo::remove_company(&state.pool, &handle).await?;
    info!(%handle, by = %admin.sub, "company deleted");
    Ok(Json(json!({ "deleted": handle })))
}
