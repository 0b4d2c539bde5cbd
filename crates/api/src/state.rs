//! Shared application state handed to every handler.

use std::sync::Arc;

use db::DbPool;

use crate::auth::AuthConfig;

#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub auth: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(pool: DbPool, auth: AuthConfig) -> Self {
        Self {
            pool,
            auth: Arc::new(auth),
        }
    }
}
