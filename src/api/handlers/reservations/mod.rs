//! Reservation endpoints and the booking admission workflow.
//!
//! A reservation holds one car for a half-open time interval
//! `[startDate, endDate)`. Admission control is the core rule: a new or
//! updated reservation is only accepted when its interval overlaps no other
//! reservation on the same car. Two intervals overlap when
//! `s1 < e2 AND s2 < e1`; a reservation that ends exactly when another starts
//! is not a conflict.
//!
//! Ownership is always derived from the authenticated session, never from the
//! request payload. Only the owner may update or delete a reservation, and
//! update never touches the owner or status fields.
//!
//! This module is split into route-focused files plus a shared storage layer:
//! `admission` and `queries` parse inputs and map the high-level flow, while
//! `storage` owns the transactional workflow and `availability` owns the
//! overlap decision.
//!
//! Flow Overview:
//! 1) Authenticate via session cookie or bearer token.
//! 2) Validate payload shape (interval ordering, status length).
//! 3) Check car availability inside a serializable transaction.
//! 4) Persist and return the committed reservation.

pub(crate) mod admission;
mod availability;
pub(crate) mod queries;
mod storage;
pub(crate) mod types;

/// The `status` column is a short free-form label (e.g. "pending").
const RESERVATION_STATUS_MAX: usize = 10;
