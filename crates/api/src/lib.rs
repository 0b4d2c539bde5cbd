//! `api` crate — HTTP REST API for companies and jobs.
//!
//! Routes:
//!   GET    /health
//!   GET    /companies            POST /companies            (admin)
//!   GET    /companies/{handle}   PATCH|DELETE                (admin)
//!   GET    /jobs                 POST /jobs                 (admin)
//!   GET    /jobs/{id}            PATCH|DELETE                (admin)

pub mod auth;
pub mod error;
pub mod handlers;
pub mod schemas;
pub mod state;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use auth::{AuthConfig, Claims};
pub use error::ApiError;
pub use state::AppState;

use handlers::{companies, health, jobs};

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/companies", get(companies::list).post(companies::create))
        .route(
            "/companies/{handle}",
            get(companies::get)
                .patch(companies::update)
                .delete(companies::delete),
        )
        .route("/jobs", get(jobs::list).post(jobs::create))
        .route(
            "/jobs/{id}",
            get(jobs::get).patch(jobs::update).delete(jobs::delete),
        )
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::authenticate,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await
}
