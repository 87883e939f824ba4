//! Password reset flow.

pub mod reset;

pub use reset::PasswordResetService;
