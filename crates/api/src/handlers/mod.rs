//! Route handlers, one module per resource.

pub mod companies;
pub mod health;
pub mod jobs;

use crate::error::ApiError;

pub use crate::state::AppState;

/// Fallback for unmatched paths.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".into())
}
