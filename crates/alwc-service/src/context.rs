//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use alwc_auth::Claims;
use alwc_core::types::UserId;
use alwc_entity::user::{User, UserRole};

/// Context for the current authenticated request.
///
/// Built by the API extractors and passed into service methods so that
/// every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    pub user_id: UserId,
    pub email: String,
    pub name: String,
    /// Role from the token, or from the store for elevated routes.
    pub role: UserRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email.clone(),
            name: claims.name.clone(),
            role: claims.role,
            request_time: Utc::now(),
        }
    }

    /// Context backed by a fresh store read.
    pub fn from_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            request_time: Utc::now(),
        }
    }

    pub fn is_elevated(&self) -> bool {
        self.role.is_elevated()
    }
}
