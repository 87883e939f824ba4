use async_trait::async_trait;

use alwc_core::result::AppResult;
use alwc_core::types::ResetTokenId;
use alwc_entity::reset::{NewResetToken, PasswordResetToken};

use super::{PgTx, db_error};
use crate::repositories::ResetTokenRepository;

const TOKEN_COLUMNS: &str = "id, user_id, token_hash, expires_at, used, created_at";

#[async_trait]
impl ResetTokenRepository for PgTx {
    async fn insert_reset_token(&mut self, token: NewResetToken) -> AppResult<PasswordResetToken> {
        sqlx::query_as::<_, PasswordResetToken>(&format!(
            "INSERT INTO password_reset_tokens (user_id, token_hash, expires_at) \
             VALUES ($1, $2, $3) RETURNING {TOKEN_COLUMNS}"
        ))
        .bind(token.user_id)
        .bind(&token.token_hash)
        .bind(token.expires_at)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(db_error("Failed to store reset token"))
    }

    async fn lock_reset_token(&mut self, token_hash: &str) -> AppResult<Option<PasswordResetToken>> {
        sqlx::query_as::<_, PasswordResetToken>(&format!(
            "SELECT {TOKEN_COLUMNS} FROM password_reset_tokens WHERE token_hash = $1 FOR UPDATE"
        ))
        .bind(token_hash)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("Failed to look up reset token"))
    }

    async fn mark_reset_token_used(&mut self, id: ResetTokenId) -> AppResult<()> {
        sqlx::query("UPDATE password_reset_tokens SET used = TRUE WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map(|_| ())
            .map_err(db_error("Failed to mark reset token used"))
    }
}
