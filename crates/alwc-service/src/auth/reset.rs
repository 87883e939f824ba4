//! Issue and redeem password reset tokens.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};

use alwc_auth::password::{PasswordHasher, PasswordValidator};
use alwc_auth::reset::{ResetTokenError, check_redeemable, generate_reset_token, hash_reset_token};
use alwc_core::error::AppError;
use alwc_core::result::AppResult;
use alwc_core::traits::Mailer;
use alwc_core::types::UserId;
use alwc_database::prelude::*;
use alwc_entity::audit::{AuditAction, EntityType, NewAuditEntry};
use alwc_entity::reset::NewResetToken;
use alwc_entity::user::{User, UserChanges};

use crate::mail::MailTemplates;

/// Answer to every forgot-password request, whether or not the account
/// exists.
pub const FORGOT_PASSWORD_MESSAGE: &str =
    "If an account exists with that email, a password reset link has been sent.";

/// Single-use, time-limited password reset.
#[derive(Debug, Clone)]
pub struct PasswordResetService {
    store: Arc<dyn Store>,
    mailer: Arc<dyn Mailer>,
    templates: MailTemplates,
    hasher: PasswordHasher,
    validator: PasswordValidator,
    ttl: Duration,
}

impl PasswordResetService {
    pub fn new(
        store: Arc<dyn Store>,
        mailer: Arc<dyn Mailer>,
        templates: MailTemplates,
        validator: PasswordValidator,
        ttl: Duration,
    ) -> Self {
        Self {
            store,
            mailer,
            templates,
            hasher: PasswordHasher::new(),
            validator,
            ttl,
        }
    }

    /// Persist a fresh token for `user` in `tx` and return the raw value.
    pub async fn issue_in(&self, tx: &mut dyn StoreTx, user_id: UserId) -> AppResult<String> {
        let (raw, digest) = generate_reset_token();
        tx.insert_reset_token(NewResetToken {
            user_id,
            token_hash: digest,
            expires_at: Utc::now() + self.ttl,
        })
        .await?;
        Ok(raw)
    }

    /// Forgot-password. Unknown addresses get the same answer and nothing
    /// is stored or sent. A delivery failure is a server error.
    pub async fn request_reset(&self, email: &str) -> AppResult<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AppError::validation("Email is required"));
        }

        let mut tx = self.store.begin().await?;
        let Some(user) = tx.find_user_by_email(email).await? else {
            info!("Password reset requested for unknown email");
            return Ok(());
        };
        let token = self.issue_in(&mut *tx, user.id).await?;
        tx.commit().await?;

        self.mailer
            .send(self.templates.password_reset(&user.email, &user.name, &token))
            .await?;
        info!(user_id = %user.id, "Password reset email sent");
        Ok(())
    }

    /// Issue a token without emailing it and return the full link. Used by
    /// operators from the CLI.
    pub async fn reset_link_for(&self, email: &str) -> AppResult<(User, String)> {
        let mut tx = self.store.begin().await?;
        let user = tx
            .find_user_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        let token = self.issue_in(&mut *tx, user.id).await?;
        tx.commit().await?;
        Ok((user, self.templates.reset_link(&token)))
    }

    /// Redeem `token` and set a new password. The password check runs
    /// before the token lookup, so a weak password leaves the token intact.
    pub async fn redeem(&self, token: &str, new_password: &str) -> AppResult<()> {
        if token.trim().is_empty() || new_password.is_empty() {
            return Err(AppError::validation("Token and new password are required"));
        }
        self.validator.validate(new_password)?;
        let password_hash = self.hasher.hash_password(new_password)?;

        let mut tx = self.store.begin().await?;
        let record = tx
            .lock_reset_token(&hash_reset_token(token))
            .await?
            .ok_or(ResetTokenError::Invalid)?;
        if let Err(reason) = check_redeemable(&record, Utc::now()) {
            warn!(token_id = %record.id, user_id = %record.user_id, %reason, "Reset token rejected");
            return Err(reason.into());
        }

        tx.update_user(
            record.user_id,
            UserChanges {
                password_hash: Some(password_hash),
                ..Default::default()
            },
        )
        .await?
        .ok_or(ResetTokenError::Invalid)?;
        tx.mark_reset_token_used(record.id).await?;
        tx.insert_audit(
            NewAuditEntry::new(record.user_id, AuditAction::ResetPassword, EntityType::User)
                .entity(record.user_id),
        )
        .await?;
        tx.commit().await?;

        info!(user_id = %record.user_id, "Password reset completed");
        Ok(())
    }
}
