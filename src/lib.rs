//! # Rezervi (Car Reservation Booking API)
//!
//! `rezervi` lets authenticated users browse a car fleet and book cars for
//! time intervals. The core of the service is admission control: a
//! reservation is only accepted when its half-open interval
//! `[startDate, endDate)` overlaps no other reservation for the same car.
//!
//! ## Booking Model
//!
//! - **Half-open intervals:** two reservations overlap when
//!   `s1 < e2 AND s2 < e1`. Back-to-back bookings (one ending exactly when
//!   the next starts) are allowed.
//! - **Ownership:** a reservation belongs to the user whose session created
//!   it. Owner fields in request payloads are ignored, and only the owner may
//!   update or delete a reservation.
//! - **Atomicity:** the availability check and the write share a serializable
//!   transaction, with a database exclusion constraint as the backstop, so
//!   concurrent requests cannot double-book a car.
//!
//! ## Authentication
//!
//! Requests carry an opaque session token in the `rezervi_session` cookie or
//! an `Authorization: Bearer` header. Only token hashes are stored; account
//! and session provisioning live outside this service.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        // Should be a hex string (full SHA-1 is 40 chars, but could be short)
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
