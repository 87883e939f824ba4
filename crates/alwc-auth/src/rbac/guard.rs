//! The role guard.
//!
//! Role hierarchy: Superuser > Admin > User. "Elevated" means admin or
//! superuser. The primary administrator is not a role: it is whichever
//! account's email matches the configured admin email.

use alwc_core::error::AppError;
use alwc_core::types::UserId;
use alwc_entity::user::{User, UserRole};

/// Message returned when a non-elevated caller hits an elevated route.
pub const ADMIN_REQUIRED: &str = "Forbidden: Admin access required";

/// Decides role-based access. Holds the primary admin email, never reads
/// it from the environment.
#[derive(Debug, Clone)]
pub struct RoleGuard {
    primary_admin_email: Option<String>,
}

impl RoleGuard {
    pub fn new(primary_admin_email: Option<String>) -> Self {
        let primary_admin_email = primary_admin_email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        Self {
            primary_admin_email,
        }
    }

    pub fn primary_admin_email(&self) -> Option<&str> {
        self.primary_admin_email.as_deref()
    }

    /// Case-insensitive match against the configured admin email. Always
    /// false when none is configured.
    pub fn is_primary_admin(&self, email: &str) -> bool {
        self.primary_admin_email
            .as_deref()
            .is_some_and(|admin| admin.eq_ignore_ascii_case(email.trim()))
    }

    pub fn require_elevated(&self, role: UserRole) -> Result<(), AppError> {
        if role.is_elevated() {
            Ok(())
        } else {
            Err(AppError::forbidden(ADMIN_REQUIRED))
        }
    }

    /// The stored account must carry the configured email and an elevated
    /// role; the email alone is not enough.
    pub fn require_primary_admin(&self, user: &User) -> Result<(), AppError> {
        if self.primary_admin_email.is_none() {
            return Err(AppError::misconfigured("Primary admin email is not configured"));
        }
        if !self.is_primary_admin(&user.email) {
            return Err(AppError::forbidden("Forbidden"));
        }
        self.require_elevated(user.role)
    }

    /// Rules for moving `target` to `new_email`. The configured email stays
    /// bound to the account that holds it.
    pub fn ensure_email_change(&self, target: &User, new_email: &str) -> Result<(), AppError> {
        let target_is_primary = self.is_primary_admin(&target.email);
        let claims_primary = self.is_primary_admin(new_email);
        if target_is_primary && !claims_primary {
            return Err(AppError::forbidden("Cannot change main admin's email"));
        }
        if claims_primary && !target_is_primary {
            return Err(AppError::forbidden("This email is reserved for the main admin"));
        }
        Ok(())
    }

    /// Rules for changing `target`'s role, checked before any write.
    pub fn ensure_role_change(&self, actor: UserId, target: &User) -> Result<(), AppError> {
        if self.is_primary_admin(&target.email) {
            return Err(AppError::forbidden("Cannot change main admin's role"));
        }
        if actor == target.id {
            return Err(AppError::forbidden("You cannot change your own role"));
        }
        Ok(())
    }

    /// Rules for deleting `target`, checked before any write.
    pub fn ensure_deletable(&self, actor: UserId, target: &User) -> Result<(), AppError> {
        if actor == target.id {
            return Err(AppError::forbidden("You cannot delete your own user account"));
        }
        if self.is_primary_admin(&target.email) {
            return Err(AppError::forbidden("Cannot delete the main admin account"));
        }
        Ok(())
    }
}
