//! Bearer-token authentication.
//!
//! Tokens are HS256 JWTs carrying the username and an admin flag. The
//! [`authenticate`] middleware runs on every route and only *records* valid
//! claims; routes that need an admin take an [`AdminUser`] argument, which
//! rejects the request with 401 when no admin claims were recorded.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{error::ApiError, state::AppState};

/// Default token lifetime.
pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// JWT claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username.
    pub sub: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
    pub iat: usize,
    pub exp: usize,
}

/// Signing configuration shared by the middleware and token issuance.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    secret: String,
    token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Sign a token for `username`.
    pub fn issue_token(
        &self,
        username: &str,
        is_admin: bool,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            is_admin,
            iat: now.timestamp() as usize,
            exp: (now + self.token_ttl).timestamp() as usize,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Verify signature and expiry, returning the claims.
    pub fn verify_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Record the caller's claims in the request extensions when a valid bearer
/// token is supplied. Never rejects on its own.
pub async fn authenticate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    if let Some(token) = bearer_token(request.headers()) {
        match state.auth.verify_token(token) {
            Ok(claims) => {
                request.extensions_mut().insert(claims);
            }
            Err(e) => warn!(error = %e, "ignoring invalid bearer token"),
        }
    }
    next.run(request).await
}

/// Extractor guarding admin-only routes.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Claims>() {
            Some(claims) if claims.is_admin => Ok(AdminUser(claims.clone())),
            Some(claims) => {
                warn!(user = %claims.sub, "admin route refused for non-admin");
                Err(ApiError::Unauthorized)
            }
            None => Err(ApiError::Unauthorized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let auth = AuthConfig::new("secret");
        let token = auth.issue_token("admin", true).unwrap();
        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert!(claims.is_admin);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = AuthConfig::new("one").issue_token("u1", true).unwrap();
        assert!(AuthConfig::new("two").verify_token(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let auth = AuthConfig::new("secret").with_token_ttl(Duration::hours(-2));
        let token = auth.issue_token("u1", false).unwrap();
        assert!(auth.verify_token(&token).is_err());
    }

    #[test]
    fn bearer_prefix_is_required() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Token abc"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers), Some("abc"));
    }
}
