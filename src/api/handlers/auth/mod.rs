//! Session resolution for authenticated requests.
//!
//! Rezervi does not manage accounts; users and their sessions are provisioned
//! by the surrounding identity system. This module resolves an incoming
//! session token (cookie or bearer) into a `Principal`, exposes a session
//! introspection endpoint, and clears sessions on logout. Only token hashes
//! ever touch the database.

pub(crate) mod principal;
pub(crate) mod session;
mod state;
mod storage;
mod utils;

pub use state::AuthConfig;

const SESSION_COOKIE_NAME: &str = "rezervi_session";
