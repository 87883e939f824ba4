//! Credential authentication and session token lifecycle.

pub mod manager;

pub use manager::{IssuedSession, SessionManager};
