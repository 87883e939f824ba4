//! Admin user management: provisioning, profile edits, role changes,
//! deletion, and elevation requests.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use alwc_auth::password::{PasswordHasher, PasswordValidator};
use alwc_auth::rbac::RoleGuard;
use alwc_core::error::AppError;
use alwc_core::result::AppResult;
use alwc_core::traits::Mailer;
use alwc_core::types::UserId;
use alwc_database::prelude::*;
use alwc_entity::audit::{AuditAction, EntityType, NewAuditEntry};
use alwc_entity::user::{NewUser, User, UserRole};

use crate::auth::PasswordResetService;
use crate::context::RequestContext;
use crate::mail::MailTemplates;
use crate::user::profile::{ADMIN_ACTIONS, ProfileUpdate, ProfileWriter};
use crate::validation::{present, require_valid_email};

/// A user as listed in the admin panel.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    #[serde(flatten)]
    pub user: User,
    #[serde(rename = "isMainAdmin")]
    pub is_main_admin: bool,
}

/// Request to provision a new user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Handles administrative user management operations.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    store: Arc<dyn Store>,
    guard: RoleGuard,
    writer: ProfileWriter,
    resets: PasswordResetService,
    mailer: Arc<dyn Mailer>,
    templates: MailTemplates,
}

impl AdminUserService {
    pub fn new(
        store: Arc<dyn Store>,
        guard: RoleGuard,
        validator: PasswordValidator,
        resets: PasswordResetService,
        mailer: Arc<dyn Mailer>,
        templates: MailTemplates,
    ) -> Self {
        Self {
            store,
            writer: ProfileWriter {
                hasher: PasswordHasher::new(),
                validator,
                guard: guard.clone(),
            },
            guard,
            resets,
            mailer,
            templates,
        }
    }

    /// All users, oldest first, flagged with primary-admin status.
    pub async fn list(&self) -> AppResult<Vec<UserSummary>> {
        let mut tx = self.store.begin().await?;
        let users = tx.list_users().await?;
        Ok(users
            .into_iter()
            .map(|user| UserSummary {
                is_main_admin: self.guard.is_primary_admin(&user.email),
                user,
            })
            .collect())
    }

    /// Provision an account with an unusable password and email the new
    /// user a link to set one. A failed welcome email is logged only.
    pub async fn create(&self, ctx: &RequestContext, input: CreateUserInput) -> AppResult<User> {
        let (Some(name), Some(email)) = (
            present(input.name.as_deref()),
            present(input.email.as_deref()),
        ) else {
            return Err(AppError::validation("Name and email are required"));
        };
        require_valid_email(email)?;
        let role = match present(input.role.as_deref()) {
            Some(raw) => raw.parse::<UserRole>()?,
            None => UserRole::User,
        };
        if role == UserRole::Superuser {
            self.guard.require_elevated(ctx.role)?;
        }
        let placeholder = self.writer.hasher.unusable_hash()?;

        let mut tx = self.store.begin().await?;
        let user = tx
            .insert_user(NewUser {
                email: email.to_string(),
                name: name.to_string(),
                password_hash: placeholder,
                role,
            })
            .await?;
        tx.insert_audit(
            NewAuditEntry::new(ctx.user_id, AuditAction::Create, EntityType::User)
                .entity(user.id)
                .new_data(user.snapshot()),
        )
        .await?;
        let token = self.resets.issue_in(&mut *tx, user.id).await?;
        tx.commit().await?;

        info!(actor_id = %ctx.user_id, user_id = %user.id, role = %user.role, "User created");

        let welcome = self.templates.welcome(&user.email, &user.name, &token);
        if let Err(e) = self.mailer.send(welcome).await {
            warn!(user_id = %user.id, error = %e, "Failed to send welcome email");
        }
        Ok(user)
    }

    /// Edit another user's name, email or password.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        target: UserId,
        input: ProfileUpdate,
    ) -> AppResult<User> {
        self.writer
            .apply(&self.store, ctx.user_id, target, &input, ADMIN_ACTIONS)
            .await
    }

    /// Change a user's role. The primary admin's role is fixed and nobody
    /// changes their own.
    pub async fn set_role(
        &self,
        ctx: &RequestContext,
        target: UserId,
        role: Option<&str>,
    ) -> AppResult<User> {
        self.guard.require_elevated(ctx.role)?;
        let raw = present(role).ok_or_else(|| AppError::validation("Role is required"))?;
        let role: UserRole = raw.parse()?;

        let mut tx = self.store.begin().await?;
        let before = tx
            .find_user(target)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        self.guard.ensure_role_change(ctx.user_id, &before)?;

        let after = tx
            .set_user_role(target, role)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        tx.insert_audit(
            NewAuditEntry::new(ctx.user_id, AuditAction::UpdateRole, EntityType::User)
                .entity(target)
                .previous(serde_json::json!({ "role": before.role }))
                .new_data(serde_json::json!({ "role": after.role })),
        )
        .await?;
        tx.commit().await?;

        info!(
            actor_id = %ctx.user_id,
            target_id = %target,
            from = %before.role,
            to = %after.role,
            "User role changed"
        );
        Ok(after)
    }

    /// Delete a user. Their audit entries stay, detached from the account.
    pub async fn delete(&self, ctx: &RequestContext, target: UserId) -> AppResult<()> {
        if ctx.user_id == target {
            return Err(AppError::forbidden("You cannot delete your own user account"));
        }
        self.guard.require_elevated(ctx.role)?;

        let mut tx = self.store.begin().await?;
        let user = tx
            .find_user(target)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        self.guard.ensure_deletable(ctx.user_id, &user)?;

        tx.delete_user(target).await?;
        tx.insert_audit(
            NewAuditEntry::new(ctx.user_id, AuditAction::Delete, EntityType::User)
                .entity(target)
                .previous(user.snapshot()),
        )
        .await?;
        tx.commit().await?;

        info!(actor_id = %ctx.user_id, target_id = %target, "User deleted");
        Ok(())
    }

    /// Ask the primary admin for elevated access. Nothing changes role; the
    /// request is emailed and audited.
    pub async fn request_superuser(&self, ctx: &RequestContext) -> AppResult<()> {
        let user = {
            let mut tx = self.store.begin().await?;
            tx.find_user(ctx.user_id)
                .await?
                .ok_or_else(|| AppError::unauthenticated("User no longer exists"))?
        };
        if user.role.is_elevated() {
            return Err(AppError::validation("You already have elevated access"));
        }
        let admin_email = self
            .guard
            .primary_admin_email()
            .ok_or_else(|| AppError::misconfigured("Primary admin email is not configured"))?;

        self.mailer
            .send(
                self.templates
                    .superuser_request(admin_email, &user.name, &user.email, user.role),
            )
            .await?;

        let mut tx = self.store.begin().await?;
        tx.insert_audit(
            NewAuditEntry::new(user.id, AuditAction::RequestSuperuser, EntityType::User)
                .entity(user.id)
                .new_data(serde_json::json!({
                    "email": user.email,
                    "name": user.name,
                    "currentRole": user.role,
                })),
        )
        .await?;
        tx.commit().await?;

        info!(user_id = %user.id, "Superuser access requested");
        Ok(())
    }
}
