//! Response DTOs.

use serde::Serialize;

use alwc_auth::RoleGuard;
use alwc_core::types::UserId;
use alwc_entity::audit::AuditLogEntry;
use alwc_entity::board::BoardMember;
use alwc_entity::event::{EventImage, EventWithImages};
use alwc_entity::user::{User, UserRole};
use alwc_service::context::RequestContext;
use alwc_service::user::UserSummary;

/// The caller as the frontend sees it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    /// `admin` or `superuser`.
    pub is_admin: bool,
    pub is_main_admin: bool,
}

impl IdentityResponse {
    pub fn from_context(ctx: &RequestContext, guard: &RoleGuard) -> Self {
        Self {
            id: ctx.user_id,
            email: ctx.email.clone(),
            name: ctx.name.clone(),
            role: ctx.role,
            is_admin: ctx.role.is_elevated(),
            is_main_admin: guard.is_primary_admin(&ctx.email),
        }
    }

    pub fn from_user(user: &User, guard: &RoleGuard) -> Self {
        Self::from_context(&RequestContext::from_user(user), guard)
    }
}

/// `{user: ..}` envelope for login and `me`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub user: IdentityResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditLogsResponse {
    pub logs: Vec<AuditLogEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventsResponse {
    pub events: Vec<EventWithImages>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImagesResponse {
    pub images: Vec<EventImage>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMembersResponse {
    pub board_members: Vec<BoardMember>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUrlResponse {
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSentResponse {
    pub message: String,
    pub recipient_count: usize,
}

/// `GET /api/health` body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
    pub storage: String,
}
