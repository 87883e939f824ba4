//! Reasons a reset token cannot be redeemed.

use thiserror::Error;

use alwc_core::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResetTokenError {
    /// No token with that digest exists.
    #[error("Invalid or expired reset token")]
    Invalid,
    #[error("This reset token has already been used")]
    AlreadyUsed,
    #[error("This reset token has expired")]
    Expired,
}

impl From<ResetTokenError> for AppError {
    fn from(err: ResetTokenError) -> Self {
        AppError::validation(err.to_string())
    }
}
