//! Password reset tokens.

pub mod error;
pub mod token;

pub use error::ResetTokenError;
pub use token::{check_redeemable, generate_reset_token, hash_reset_token};
