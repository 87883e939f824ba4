//! Password reset token persistence.

use async_trait::async_trait;

use alwc_core::result::AppResult;
use alwc_core::types::ResetTokenId;
use alwc_entity::reset::{NewResetToken, PasswordResetToken};

#[async_trait]
pub trait ResetTokenRepository: Send {
    async fn insert_reset_token(&mut self, token: NewResetToken) -> AppResult<PasswordResetToken>;

    /// Look up a token by digest and lock its row until the transaction
    /// ends, so two redemptions of one token serialize.
    async fn lock_reset_token(&mut self, token_hash: &str) -> AppResult<Option<PasswordResetToken>>;

    async fn mark_reset_token_used(&mut self, id: ResetTokenId) -> AppResult<()>;
}
