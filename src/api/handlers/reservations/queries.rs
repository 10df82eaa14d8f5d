//! Read endpoints for reservations.
//!
//! Listing is always scoped to the authenticated user; single fetches are
//! owner-only and answer `404` for foreign reservations to avoid leaking
//! their existence.

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

use super::super::auth::principal::require_auth;
use super::{
    storage::{fetch_for_user, fetch_owned},
    types::ReservationResponse,
};

/// Listing outcome for the user-scoped endpoint, which distinguishes an
/// empty result set from a populated one at the transport layer.
pub(crate) enum ReservationListing {
    Empty,
    Found(Vec<ReservationResponse>),
}

/// Fetches a user's reservations as response DTOs for `/v1/users/{id}`.
pub(crate) async fn reservations_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<ReservationListing, sqlx::Error> {
    let rows = fetch_for_user(pool, user_id).await?;
    if rows.is_empty() {
        return Ok(ReservationListing::Empty);
    }
    Ok(ReservationListing::Found(
        rows.iter().map(|row| row.to_response()).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/v1/reservations",
    responses(
        (status = 200, description = "The caller's reservations.", body = [ReservationResponse]),
        (status = 401, description = "Missing or invalid session."),
    ),
    tag = "reservations"
)]
/// Lists the authenticated user's reservations, most recent interval first.
pub async fn list_reservations(headers: HeaderMap, pool: Extension<PgPool>) -> impl IntoResponse {
    let principal = match require_auth(&headers, &pool).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    match fetch_for_user(&pool, principal.user_id).await {
        Ok(rows) => {
            let body: Vec<ReservationResponse> =
                rows.iter().map(|row| row.to_response()).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => {
            error!("Failed to list reservations: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/v1/reservations/{id}",
    params(("id" = Uuid, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "The reservation.", body = ReservationResponse),
        (status = 401, description = "Missing or invalid session."),
        (status = 404, description = "Reservation not found."),
    ),
    tag = "reservations"
)]
/// Fetches one owned reservation. Missing and foreign reservations both
/// answer `404`.
pub async fn get_reservation(
    Path(reservation_id): Path<Uuid>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &pool).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    match fetch_owned(&pool, principal.user_id, reservation_id).await {
        Ok(Some(row)) => (StatusCode::OK, Json(row.to_response())).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Reservation not found." })),
        )
            .into_response(),
        Err(err) => {
            error!("Failed to fetch reservation: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
