//! Audit log persistence. Append and read only.

use async_trait::async_trait;

use alwc_core::result::AppResult;
use alwc_core::types::AuditLogId;
use alwc_entity::audit::{AuditLogEntry, NewAuditEntry};

#[async_trait]
pub trait AuditRepository: Send {
    async fn insert_audit(&mut self, entry: NewAuditEntry) -> AppResult<AuditLogId>;

    /// Newest first, joined with the actor's current email and name.
    async fn list_audit(&mut self, limit: i64, offset: i64) -> AppResult<Vec<AuditLogEntry>>;
}
