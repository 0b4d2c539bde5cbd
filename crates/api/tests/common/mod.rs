//! Shared helpers for the route tests.

#![allow(dead_code)]

use axum::http::{HeaderValue, StatusCode};
use axum_test::{TestResponse, TestServer};
use serde_json::{json, Value};

use api::{router, AppState, AuthConfig};
use db::DbPool;

pub const SECRET: &str = "test-secret";

/// A server over `pool` that signs and accepts tokens with [`SECRET`].
pub fn server_with(pool: DbPool) -> TestServer {
    let state = AppState::new(pool, AuthConfig::new(SECRET));
    TestServer::new(router(state)).expect("Failed to create test server")
}

pub fn bearer(username: &str, is_admin: bool) -> HeaderValue {
    let token = AuthConfig::new(SECRET)
        .issue_token(username, is_admin)
        .expect("token");
    HeaderValue::from_str(&format!("Bearer {token}")).expect("header")
}

pub fn admin() -> HeaderValue {
    bearer("admin", true)
}

/// Assert an error envelope with `status` and return its message.
pub fn assert_error(response: &TestResponse, status: StatusCode) -> String {
    assert_eq!(response.status_code(), status);
    let body: Value = response.json();
    assert_eq!(body["error"]["status"], status.as_u16());
    body["error"]["message"]
        .as_str()
        .expect("error message")
        .to_string()
}

pub fn company_body() -> Value {
    json!({
        "handle": "acme",
        "name": "Acme",
        "description": "Anvils",
        "numEmployees": 10,
        "logoUrl": "https://acme.test/logo.png"
    })
}
