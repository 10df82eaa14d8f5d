//! Write endpoints for reservations: create, update, delete.
//!
//! These handlers resolve the acting user from the session, validate payload
//! shape, and delegate the availability check and persistence to `storage`.
//! Any owner supplied in the payload is ignored; the authenticated principal
//! always owns what it creates.

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use super::super::auth::principal::require_auth;
use super::{
    storage::{admit_create, admit_delete, admit_update},
    types::{CreateReservationRequest, ReservationResponse, UpdateReservationRequest},
    RESERVATION_STATUS_MAX,
};

#[utoipa::path(
    post,
    path = "/v1/reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created.", body = ReservationResponse),
        (status = 400, description = "End date not after start date, or invalid status.", body = String),
        (status = 401, description = "Missing or invalid session."),
        (status = 404, description = "Car not found."),
        (status = 409, description = "Car already reserved for an overlapping interval.", body = String),
    ),
    tag = "reservations"
)]
/// Books a car for `[startDate, endDate)` on behalf of the authenticated user.
/// The interval is admitted only when it overlaps no existing reservation for
/// the car; the check and the insert share one serializable transaction.
pub async fn create_reservation(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    Json(payload): Json<CreateReservationRequest>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &pool).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    if let Some(status) = payload.status.as_deref() {
        if status.is_empty() || status.len() > RESERVATION_STATUS_MAX {
            return (StatusCode::BAD_REQUEST, "Invalid reservation status.").into_response();
        }
    }

    match admit_create(
        &pool,
        principal.user_id,
        payload.car,
        payload.start_date,
        payload.end_date,
        payload.status.as_deref(),
    )
    .await
    {
        Ok(row) => (StatusCode::CREATED, Json(row.to_response())).into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    put,
    path = "/v1/reservations/{id}",
    request_body = UpdateReservationRequest,
    params(("id" = Uuid, Path, description = "Reservation id")),
    responses(
        (status = 200, description = "Reservation updated.", body = ReservationResponse),
        (status = 400, description = "Merged interval is invalid.", body = String),
        (status = 401, description = "Missing or invalid session."),
        (status = 403, description = "Acting user does not own the reservation.", body = String),
        (status = 404, description = "Reservation or car not found."),
        (status = 409, description = "Car already reserved for an overlapping interval.", body = String),
    ),
    tag = "reservations"
)]
/// Applies a partial update to an owned reservation. Absent fields keep their
/// stored values; the reservation's own slot is excluded from the
/// availability check so an unchanged patch always succeeds.
pub async fn update_reservation(
    Path(reservation_id): Path<Uuid>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
    Json(payload): Json<UpdateReservationRequest>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &pool).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    match admit_update(&pool, principal.user_id, reservation_id, &payload).await {
        Ok(row) => (StatusCode::OK, Json(row.to_response())).into_response(),
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    delete,
    path = "/v1/reservations/{id}",
    params(("id" = Uuid, Path, description = "Reservation id")),
    responses(
        (status = 204, description = "Reservation deleted."),
        (status = 401, description = "Missing or invalid session."),
        (status = 403, description = "Acting user does not own the reservation.", body = String),
        (status = 404, description = "Reservation not found."),
    ),
    tag = "reservations"
)]
/// Cancels an owned reservation. Only the owner may delete; others receive
/// `403` and the stored state is untouched.
pub async fn delete_reservation(
    Path(reservation_id): Path<Uuid>,
    headers: HeaderMap,
    pool: Extension<PgPool>,
) -> impl IntoResponse {
    let principal = match require_auth(&headers, &pool).await {
        Ok(principal) => principal,
        Err(status) => return status.into_response(),
    };

    match admit_delete(&pool, principal.user_id, reservation_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
