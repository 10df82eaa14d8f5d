//! API handlers for Rezervi.
//!
//! This module organizes the service's route handlers: health and root
//! probes, session resolution under `auth`, car browsing, the reservation
//! admission workflow, and the user-scoped reservation listing.

pub mod auth;
pub mod cars;
pub mod health;
pub mod reservations;
pub mod root;
pub mod users;
