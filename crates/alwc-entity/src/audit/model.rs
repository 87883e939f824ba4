//! Audit log entry entity model.

use alwc_core::types::{AuditLogId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::action::{AuditAction, EntityType};

/// An immutable audit entry joined with the actor's current identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLogEntry {
    pub id: AuditLogId,
    /// Null once the actor is deleted.
    pub user_id: Option<UserId>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<i64>,
    pub entity_slug: Option<String>,
    pub previous_data: Option<serde_json::Value>,
    pub new_data: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    /// Actor's email at read time.
    pub user_email: Option<String>,
    /// Actor's name at read time.
    pub user_name: Option<String>,
}

/// Data required to append an audit entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditEntry {
    pub user_id: Option<UserId>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<i64>,
    pub entity_slug: Option<String>,
    pub previous_data: Option<serde_json::Value>,
    pub new_data: Option<serde_json::Value>,
}

impl NewAuditEntry {
    pub fn new(actor: UserId, action: AuditAction, entity_type: EntityType) -> Self {
        Self {
            user_id: Some(actor),
            action: action.as_str().to_string(),
            entity_type: entity_type.as_str().to_string(),
            entity_id: None,
            entity_slug: None,
            previous_data: None,
            new_data: None,
        }
    }

    pub fn entity(mut self, id: impl Into<i64>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.entity_slug = Some(slug.into());
        self
    }

    pub fn previous(mut self, data: serde_json::Value) -> Self {
        self.previous_data = Some(data);
        self
    }

    pub fn new_data(mut self, data: serde_json::Value) -> Self {
        self.new_data = Some(data);
        self
    }
}
