//! Reset token generation and checks.
//!
//! The raw token is 32 random bytes, hex encoded, and only ever appears in
//! the emailed link. The store keeps its SHA-256 digest.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use alwc_entity::reset::PasswordResetToken;

use super::error::ResetTokenError;

/// A fresh token: `(raw, digest)`.
pub fn generate_reset_token() -> (String, String) {
    let bytes: [u8; 32] = rand::random();
    let raw = hex::encode(bytes);
    let digest = hash_reset_token(&raw);
    (raw, digest)
}

/// Lowercase hex SHA-256 of the raw token.
pub fn hash_reset_token(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.trim().as_bytes()))
}

/// Used is checked before expiry.
pub fn check_redeemable(
    token: &PasswordResetToken,
    now: DateTime<Utc>,
) -> Result<(), ResetTokenError> {
    if token.used {
        return Err(ResetTokenError::AlreadyUsed);
    }
    if token.is_expired_at(now) {
        return Err(ResetTokenError::Expired);
    }
    Ok(())
}
