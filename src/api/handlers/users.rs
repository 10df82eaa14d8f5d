//! User-scoped reservation listing.
//!
//! Flow Overview:
//! 1) Authenticate the request via session token.
//! 2) Verify the caller is asking for their own reservations.
//! 3) Return the list, or `404` with a message when it is empty.

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use sqlx::PgPool;
use tracing::error;
use uuid::Uuid;

use super::auth::principal::require_auth;
use super::reservations::queries::{reservations_for_user, ReservationListing};
use super::reservations::types::ReservationResponse;

#[utoipa::path(
    get,
    path = "/v1/users/{id}/reservations",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "The user's reservations.", body = [ReservationResponse]),
        (status = 401, description = "Missing or invalid session."),
        (status = 403, description = "Caller is not the requested user.", body = String),
        (status = 404, description = "No reservations found."),
    ),
    tag = "users"
)]
/// Lists the reservations of one user. Callers may only query themselves; an
/// empty result set answers `404` rather than an empty list.
pub async fn get_user_reservations(
    Path(user_id): Path<Uuid>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &pool).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    if principal.user_id != user_id {
        return (
            StatusCode::FORBIDDEN,
            "You do not have permission to access these reservations.",
        )
            .into_response();
    }

    match reservations_for_user(&pool, user_id).await {
        Ok(ReservationListing::Empty) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No reservations found." })),
        )
            .into_response(),
        Ok(ReservationListing::Found(list)) => (StatusCode::OK, Json(list)).into_response(),
        Err(err) => {
            error!("Failed to list user reservations: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
