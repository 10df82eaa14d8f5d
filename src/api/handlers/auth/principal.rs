//! Authenticated principal extraction.
//!
//! Flow Overview: read the session token, resolve it to a user, and return a
//! principal that downstream handlers can use for ownership checks.

use axum::http::{HeaderMap, StatusCode};
use sqlx::PgPool;

use super::session::authenticate_session;

/// Authenticated user context derived from the session token.
#[derive(Clone, Debug)]
pub struct Principal {
    pub user_id: uuid::Uuid,
    pub email: String,
}

/// Resolve a session token into a principal, or return 401 for missing
/// sessions.
pub async fn require_auth(headers: &HeaderMap, pool: &PgPool) -> Result<Principal, StatusCode> {
    match authenticate_session(headers, pool).await {
        Ok(Some(record)) => Ok(Principal {
            user_id: record.user_id,
            email: record.email,
        }),
        Ok(None) => Err(StatusCode::UNAUTHORIZED),
        Err(status) => Err(status),
    }
}
