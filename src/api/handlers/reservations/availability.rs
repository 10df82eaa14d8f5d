//! Car availability: the interval overlap decision.
//!
//! Intervals are half-open `[start, end)`. Two intervals overlap when
//! `s1 < e2 AND s2 < e1`, so back-to-back reservations (one ending exactly
//! when the next starts) are allowed.

use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

/// Overlap rule for two half-open intervals.
pub(super) fn overlaps(
    s1: DateTime<Utc>,
    e1: DateTime<Utc>,
    s2: DateTime<Utc>,
    e2: DateTime<Utc>,
) -> bool {
    s1 < e2 && s2 < e1
}

/// Returns `true` when the candidate interval overlaps any stored reservation
/// for the car.
///
/// `exclude` skips one reservation id so an update does not conflict with its
/// own stored slot. Interval ordering is the caller's responsibility; this
/// function only decides overlap. Runs on the caller's executor so it
/// participates in the admission transaction, and propagates storage errors
/// unchanged.
pub(super) async fn has_conflict<'a, E>(
    executor: E,
    car_id: Uuid,
    start_at: DateTime<Utc>,
    end_at: DateTime<Utc>,
    exclude: Option<Uuid>,
) -> Result<bool, sqlx::Error>
where
    E: sqlx::PgExecutor<'a>,
{
    let query = r"
        SELECT start_at, end_at
        FROM reservations
        WHERE car_id = $1
          AND ($2::uuid IS NULL OR id <> $2)
    ";
    let rows = sqlx::query(query)
        .bind(car_id)
        .bind(exclude)
        .fetch_all(executor)
        .await?;

    Ok(rows.iter().any(|row| {
        overlaps(
            start_at,
            end_at,
            row.get("start_at"),
            row.get("end_at"),
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 10, 5, hour, minute, 0).unwrap()
    }

    #[test]
    fn touching_boundary_is_not_overlap() {
        // [10:00, 12:00) vs [12:00, 13:00): end is exclusive.
        assert!(!overlaps(at(10, 0), at(12, 0), at(12, 0), at(13, 0)));
        assert!(!overlaps(at(12, 0), at(13, 0), at(10, 0), at(12, 0)));
    }

    #[test]
    fn partial_overlap_is_conflict() {
        // [10:00, 12:00) vs [11:00, 13:00)
        assert!(overlaps(at(10, 0), at(12, 0), at(11, 0), at(13, 0)));
        assert!(overlaps(at(11, 0), at(13, 0), at(10, 0), at(12, 0)));
    }

    #[test]
    fn containment_is_conflict() {
        assert!(overlaps(at(9, 0), at(14, 0), at(10, 0), at(11, 0)));
        assert!(overlaps(at(10, 0), at(11, 0), at(9, 0), at(14, 0)));
    }

    #[test]
    fn identical_intervals_conflict() {
        assert!(overlaps(at(10, 0), at(12, 0), at(10, 0), at(12, 0)));
    }

    #[test]
    fn disjoint_intervals_do_not_conflict() {
        assert!(!overlaps(at(8, 0), at(9, 0), at(10, 0), at(11, 0)));
        assert!(!overlaps(at(10, 0), at(11, 0), at(8, 0), at(9, 0)));
    }
}
