//! Audit log listing. Writes happen inside each service's own transaction.

use std::sync::Arc;

use tracing::debug;

use alwc_core::result::AppResult;
use alwc_core::types::ListWindow;
use alwc_database::prelude::*;
use alwc_entity::audit::AuditLogEntry;

/// Read side of the audit trail.
#[derive(Debug, Clone)]
pub struct AuditService {
    store: Arc<dyn Store>,
}

impl AuditService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Newest first. The window's limit is clamped; an offset past the end
    /// yields an empty list.
    pub async fn list(&self, window: ListWindow) -> AppResult<Vec<AuditLogEntry>> {
        let (limit, offset) = (window.limit(), window.offset());
        debug!(limit, offset, "Listing audit log");
        let mut tx = self.store.begin().await?;
        tx.list_audit(limit, offset).await
    }
}
