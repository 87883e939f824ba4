use async_trait::async_trait;

use alwc_core::result::AppResult;
use alwc_core::types::AuditLogId;
use alwc_entity::audit::{AuditLogEntry, NewAuditEntry};

use super::{PgTx, db_error};
use crate::repositories::AuditRepository;

#[async_trait]
impl AuditRepository for PgTx {
    async fn insert_audit(&mut self, entry: NewAuditEntry) -> AppResult<AuditLogId> {
        sqlx::query_scalar::<_, AuditLogId>(
            "INSERT INTO audit_logs \
                 (user_id, action, entity_type, entity_id, entity_slug, previous_data, new_data) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
        )
        .bind(entry.user_id)
        .bind(&entry.action)
        .bind(&entry.entity_type)
        .bind(entry.entity_id)
        .bind(&entry.entity_slug)
        .bind(&entry.previous_data)
        .bind(&entry.new_data)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(db_error("Failed to write audit entry"))
    }

    async fn list_audit(&mut self, limit: i64, offset: i64) -> AppResult<Vec<AuditLogEntry>> {
        sqlx::query_as::<_, AuditLogEntry>(
            "SELECT a.id, a.user_id, a.action, a.entity_type, a.entity_id, a.entity_slug, \
                    a.previous_data, a.new_data, a.created_at, \
                    u.email AS user_email, u.name AS user_name \
             FROM audit_logs a \
             LEFT JOIN users u ON u.id = a.user_id \
             ORDER BY a.created_at DESC, a.id DESC \
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(db_error("Failed to list audit entries"))
    }
}
