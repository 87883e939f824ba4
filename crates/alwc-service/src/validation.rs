//! Input checks shared by services.

use validator::ValidateEmail;

use alwc_core::error::AppError;

/// Trimmed, non-empty value or `None`.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn is_valid_email(email: &str) -> bool {
    email.trim().validate_email()
}

pub fn require_valid_email(email: &str) -> Result<(), AppError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(AppError::validation("Invalid email address"))
    }
}
