//! Transactional storage for the reservation admission workflow.
//!
//! Create and update run their availability check and write inside a single
//! serializable transaction, so two concurrent bookings for the same car
//! cannot both pass the check. The schema's exclusion constraint on
//! `(car_id, tstzrange(start_at, end_at))` is the storage backstop; both the
//! constraint violation and a serialization failure surface as
//! `CarUnavailable`.

use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::error;
use uuid::Uuid;

use super::availability::has_conflict;
use super::types::{format_instant, ReservationResponse, UpdateReservationRequest};

#[derive(Debug)]
pub(super) struct ReservationRow {
    id: Uuid,
    car_id: Uuid,
    user_id: Uuid,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    status: Option<String>,
    created_at: DateTime<Utc>,
}

impl ReservationRow {
    /// Converts the stored row into a `ReservationResponse` DTO for API
    /// responses. Ids are rendered as strings and instants as RFC 3339.
    pub(super) fn to_response(&self) -> ReservationResponse {
        ReservationResponse {
            id: self.id.to_string(),
            car: self.car_id.to_string(),
            user: self.user_id.to_string(),
            start_date: format_instant(self.start_at),
            end_date: format_instant(self.end_at),
            status: self.status.clone(),
            created_at: format_instant(self.created_at),
        }
    }
}

/// Terminal rejection reasons for the admission workflow.
///
/// Each variant maps to a stable HTTP status; database errors are logged
/// server-side and surfaced as `500` without leaking details.
#[derive(Debug)]
pub(crate) enum ReservationError {
    InvalidInterval,
    CarUnavailable,
    NotFound(&'static str),
    Forbidden,
    Database(sqlx::Error),
}

impl IntoResponse for ReservationError {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::InvalidInterval => (
                StatusCode::BAD_REQUEST,
                "The end date must be after the start date.",
            )
                .into_response(),
            Self::CarUnavailable => (
                StatusCode::CONFLICT,
                "The car is not available for the selected dates.",
            )
                .into_response(),
            Self::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                "You do not have permission to modify this reservation.",
            )
                .into_response(),
            Self::Database(err) => {
                error!("Database error: {err}");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Admits a new reservation for `user_id`, or rejects it without writing.
///
/// Ordering is validated first; the availability check and the insert then
/// share a serializable transaction. The caller has already resolved the
/// acting user from the session, never from the payload.
pub(super) async fn admit_create(
    pool: &PgPool,
    user_id: Uuid,
    car_id: Uuid,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    status: Option<&str>,
) -> Result<ReservationRow, ReservationError> {
    if start_at >= end_at {
        return Err(ReservationError::InvalidInterval);
    }

    let mut tx = begin_serializable(pool).await?;

    if !car_exists(&mut tx, car_id).await? {
        return Err(ReservationError::NotFound("Car not found."));
    }

    if has_conflict(&mut *tx, car_id, start_at, end_at, None)
        .await
        .map_err(admission_failure)?
    {
        return Err(ReservationError::CarUnavailable);
    }

    let insert = sqlx::query(
        r"
        INSERT INTO reservations (car_id, user_id, start_at, end_at, status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, car_id, user_id, start_at, end_at, status, created_at
        ",
    )
    .bind(car_id)
    .bind(user_id)
    .bind(start_at)
    .bind(end_at)
    .bind(status)
    .fetch_one(&mut *tx)
    .await
    .map_err(admission_failure)?;

    let row = from_row(&insert);
    tx.commit().await.map_err(admission_failure)?;
    Ok(row)
}

/// Admits an update to an existing reservation, or rejects it unchanged.
///
/// The owner check runs before any field is merged; status and owner are
/// never altered by this path. The reservation's own slot is excluded from
/// the availability check so an unchanged or shrunk interval cannot conflict
/// with itself.
pub(super) async fn admit_update(
    pool: &PgPool,
    user_id: Uuid,
    reservation_id: Uuid,
    patch: &UpdateReservationRequest,
) -> Result<ReservationRow, ReservationError> {
    let mut tx = begin_serializable(pool).await?;

    let Some(existing) = fetch_in_tx(&mut tx, reservation_id).await? else {
        return Err(ReservationError::NotFound("Reservation not found."));
    };
    if existing.user_id != user_id {
        return Err(ReservationError::Forbidden);
    }

    let (car_id, start_at, end_at) = merge_patch(&existing, patch);
    if start_at >= end_at {
        return Err(ReservationError::InvalidInterval);
    }

    if car_id != existing.car_id && !car_exists(&mut tx, car_id).await? {
        return Err(ReservationError::NotFound("Car not found."));
    }

    if has_conflict(&mut *tx, car_id, start_at, end_at, Some(reservation_id))
        .await
        .map_err(admission_failure)?
    {
        return Err(ReservationError::CarUnavailable);
    }

    let update = sqlx::query(
        r"
        UPDATE reservations
        SET car_id = $1, start_at = $2, end_at = $3
        WHERE id = $4
        RETURNING id, car_id, user_id, start_at, end_at, status, created_at
        ",
    )
    .bind(car_id)
    .bind(start_at)
    .bind(end_at)
    .bind(reservation_id)
    .fetch_one(&mut *tx)
    .await
    .map_err(admission_failure)?;

    let row = from_row(&update);
    tx.commit().await.map_err(admission_failure)?;
    Ok(row)
}

/// Deletes a reservation after verifying the acting user owns it.
pub(super) async fn admit_delete(
    pool: &PgPool,
    user_id: Uuid,
    reservation_id: Uuid,
) -> Result<(), ReservationError> {
    let existing = sqlx::query(
        "SELECT user_id FROM reservations WHERE id = $1",
    )
    .bind(reservation_id)
    .fetch_optional(pool)
    .await
    .map_err(ReservationError::Database)?;

    let Some(existing) = existing else {
        return Err(ReservationError::NotFound("Reservation not found."));
    };
    let owner: Uuid = existing.get("user_id");
    if owner != user_id {
        return Err(ReservationError::Forbidden);
    }

    sqlx::query("DELETE FROM reservations WHERE id = $1")
        .bind(reservation_id)
        .execute(pool)
        .await
        .map_err(ReservationError::Database)?;
    Ok(())
}

/// Lists all reservations owned by `user_id`, most recent interval first.
pub(super) async fn fetch_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<ReservationRow>, sqlx::Error> {
    let rows = sqlx::query(
        r"
        SELECT id, car_id, user_id, start_at, end_at, status, created_at
        FROM reservations
        WHERE user_id = $1
        ORDER BY start_at DESC
        ",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(from_row).collect())
}

/// Fetches one reservation scoped to its owner, `None` when missing or owned
/// by someone else.
pub(super) async fn fetch_owned(
    pool: &PgPool,
    user_id: Uuid,
    reservation_id: Uuid,
) -> Result<Option<ReservationRow>, sqlx::Error> {
    let row = sqlx::query(
        r"
        SELECT id, car_id, user_id, start_at, end_at, status, created_at
        FROM reservations
        WHERE id = $1 AND user_id = $2
        LIMIT 1
        ",
    )
    .bind(reservation_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.as_ref().map(from_row))
}

/// Merge semantics for PUT: supplied fields overwrite, absent fields keep
/// their stored values. Status and owner are not part of the patch.
fn merge_patch(
    existing: &ReservationRow,
    patch: &UpdateReservationRequest,
) -> (Uuid, DateTime<Utc>, DateTime<Utc>) {
    (
        patch.car.unwrap_or(existing.car_id),
        patch.start_date.unwrap_or(existing.start_at),
        patch.end_date.unwrap_or(existing.end_at),
    )
}

async fn begin_serializable(
    pool: &PgPool,
) -> Result<Transaction<'_, Postgres>, ReservationError> {
    let mut tx = pool.begin().await.map_err(ReservationError::Database)?;
    // The availability check and the write must observe the same snapshot.
    sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
        .execute(&mut *tx)
        .await
        .map_err(ReservationError::Database)?;
    Ok(tx)
}

async fn car_exists(
    tx: &mut Transaction<'_, Postgres>,
    car_id: Uuid,
) -> Result<bool, ReservationError> {
    let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM cars WHERE id = $1) AS exists")
        .bind(car_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(ReservationError::Database)?;
    Ok(row.get::<bool, _>("exists"))
}

async fn fetch_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    reservation_id: Uuid,
) -> Result<Option<ReservationRow>, ReservationError> {
    let row = sqlx::query(
        r"
        SELECT id, car_id, user_id, start_at, end_at, status, created_at
        FROM reservations
        WHERE id = $1
        LIMIT 1
        ",
    )
    .bind(reservation_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(ReservationError::Database)?;
    Ok(row.as_ref().map(from_row))
}

fn from_row(row: &sqlx::postgres::PgRow) -> ReservationRow {
    ReservationRow {
        id: row.get("id"),
        car_id: row.get("car_id"),
        user_id: row.get("user_id"),
        start_at: row.get("start_at"),
        end_at: row.get("end_at"),
        status: row.get("status"),
        created_at: row.get("created_at"),
    }
}

/// Concurrent admissions lose either to the exclusion constraint (`23P01`)
/// or to a serialization failure (`40001`); both mean the slot was taken.
fn admission_failure(err: sqlx::Error) -> ReservationError {
    let conflicting = match &err {
        sqlx::Error::Database(db_err) => {
            matches!(db_err.code().as_deref(), Some("23P01" | "40001"))
        }
        _ => false,
    };
    if conflicting {
        ReservationError::CarUnavailable
    } else {
        ReservationError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::TimeZone;

    fn sample_row() -> ReservationRow {
        ReservationRow {
            id: Uuid::new_v4(),
            car_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            start_at: Utc.with_ymd_and_hms(2023, 10, 1, 0, 0, 0).unwrap(),
            end_at: Utc.with_ymd_and_hms(2023, 10, 5, 0, 0, 0).unwrap(),
            status: Some("pending".to_string()),
            created_at: Utc.with_ymd_and_hms(2023, 9, 30, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn merge_patch_keeps_stored_values_for_absent_fields() {
        let existing = sample_row();
        let (car_id, start_at, end_at) =
            merge_patch(&existing, &UpdateReservationRequest::default());
        assert_eq!(car_id, existing.car_id);
        assert_eq!(start_at, existing.start_at);
        assert_eq!(end_at, existing.end_at);
    }

    #[test]
    fn merge_patch_overwrites_supplied_fields() {
        let existing = sample_row();
        let new_end = Utc.with_ymd_and_hms(2023, 10, 6, 0, 0, 0).unwrap();
        let patch = UpdateReservationRequest {
            end_date: Some(new_end),
            ..UpdateReservationRequest::default()
        };
        let (car_id, start_at, end_at) = merge_patch(&existing, &patch);
        assert_eq!(car_id, existing.car_id);
        assert_eq!(start_at, existing.start_at);
        assert_eq!(end_at, new_end);
    }

    #[test]
    fn merge_patch_can_move_the_reservation_to_another_car() {
        let existing = sample_row();
        let other_car = Uuid::new_v4();
        let patch = UpdateReservationRequest {
            car: Some(other_car),
            ..UpdateReservationRequest::default()
        };
        let (car_id, _, _) = merge_patch(&existing, &patch);
        assert_eq!(car_id, other_car);
    }

    #[test]
    fn rejection_reasons_map_to_stable_statuses() {
        assert_eq!(
            ReservationError::InvalidInterval.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ReservationError::CarUnavailable.into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ReservationError::NotFound("Reservation not found.")
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ReservationError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn response_renders_ids_and_instants_as_strings() {
        let row = sample_row();
        let response = row.to_response();
        assert_eq!(response.id, row.id.to_string());
        assert_eq!(response.start_date, "2023-10-01T00:00:00Z");
        assert_eq!(response.end_date, "2023-10-05T00:00:00Z");
        assert_eq!(response.status.as_deref(), Some("pending"));
    }
}
