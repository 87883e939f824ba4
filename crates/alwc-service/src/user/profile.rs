//! Profile updates: a user editing themself, or the primary admin editing
//! anyone.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use alwc_auth::password::{PasswordHasher, PasswordValidator};
use alwc_auth::rbac::RoleGuard;
use alwc_core::error::AppError;
use alwc_core::result::AppResult;
use alwc_core::types::UserId;
use alwc_database::prelude::*;
use alwc_entity::audit::{AuditAction, EntityType, NewAuditEntry};
use alwc_entity::user::{User, UserChanges};

use crate::context::RequestContext;
use crate::validation::{present, require_valid_email};

/// Requested profile changes. Blank fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Audit verbs for the three kinds of profile change.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ProfileActions {
    pub password: AuditAction,
    pub email: AuditAction,
    pub other: AuditAction,
}

pub(crate) const OWN_ACTIONS: ProfileActions = ProfileActions {
    password: AuditAction::UpdateOwnPassword,
    email: AuditAction::UpdateOwnEmail,
    other: AuditAction::UpdateProfile,
};

pub(crate) const ADMIN_ACTIONS: ProfileActions = ProfileActions {
    password: AuditAction::UpdatePassword,
    email: AuditAction::UpdateEmail,
    other: AuditAction::Update,
};

/// Validates, hashes, and applies profile changes.
#[derive(Debug, Clone)]
pub(crate) struct ProfileWriter {
    pub hasher: PasswordHasher,
    pub validator: PasswordValidator,
    pub guard: RoleGuard,
}

impl ProfileWriter {
    fn prepare(&self, input: &ProfileUpdate) -> AppResult<UserChanges> {
        let name = present(input.name.as_deref()).map(str::to_string);
        let email = match present(input.email.as_deref()) {
            Some(email) => {
                require_valid_email(email)?;
                Some(email.to_string())
            }
            None => None,
        };
        let password_hash = match input.password.as_deref().filter(|p| !p.is_empty()) {
            Some(password) => {
                self.validator.validate(password)?;
                Some(self.hasher.hash_password(password)?)
            }
            None => None,
        };

        let changes = UserChanges {
            name,
            email,
            password_hash,
        };
        if changes.is_empty() {
            return Err(AppError::validation("Nothing to update"));
        }
        Ok(changes)
    }

    /// Apply `input` to `target` and record one audit entry.
    pub async fn apply(
        &self,
        store: &Arc<dyn Store>,
        actor: UserId,
        target: UserId,
        input: &ProfileUpdate,
        actions: ProfileActions,
    ) -> AppResult<User> {
        let changes = self.prepare(input)?;

        let mut tx = store.begin().await?;
        let before = tx
            .find_user(target)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        if let Some(email) = changes.email.as_deref() {
            self.guard.ensure_email_change(&before, email)?;
        }

        let action = if changes.password_hash.is_some() {
            actions.password
        } else if changes
            .email
            .as_deref()
            .is_some_and(|email| !before.has_email(email))
        {
            actions.email
        } else {
            actions.other
        };

        let after = tx
            .update_user(target, changes)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        tx.insert_audit(
            NewAuditEntry::new(actor, action, EntityType::User)
                .entity(target)
                .previous(before.profile_snapshot())
                .new_data(after.profile_snapshot()),
        )
        .await?;
        tx.commit().await?;

        info!(actor_id = %actor, target_id = %target, action = %action, "User profile updated");
        Ok(after)
    }
}

/// Self-service profile edits.
#[derive(Debug, Clone)]
pub struct ProfileService {
    store: Arc<dyn Store>,
    writer: ProfileWriter,
}

impl ProfileService {
    pub fn new(store: Arc<dyn Store>, guard: RoleGuard, validator: PasswordValidator) -> Self {
        Self {
            store,
            writer: ProfileWriter {
                hasher: PasswordHasher::new(),
                validator,
                guard,
            },
        }
    }

    /// Update the caller's own name, email or password.
    pub async fn update_own(&self, ctx: &RequestContext, input: ProfileUpdate) -> AppResult<User> {
        self.writer
            .apply(&self.store, ctx.user_id, ctx.user_id, &input, OWN_ACTIONS)
            .await
    }
}
