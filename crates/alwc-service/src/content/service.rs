//! Page content blocks addressed by slug.

use std::sync::Arc;

use tracing::info;

use alwc_core::error::AppError;
use alwc_core::result::AppResult;
use alwc_database::prelude::*;
use alwc_entity::audit::{AuditAction, EntityType, NewAuditEntry};
use alwc_entity::content::SiteContent;

use crate::context::RequestContext;

#[derive(Debug, Clone)]
pub struct ContentService {
    store: Arc<dyn Store>,
}

impl ContentService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// `None` when nothing has been saved under `slug` yet.
    pub async fn get(&self, slug: &str) -> AppResult<Option<SiteContent>> {
        let mut tx = self.store.begin().await?;
        tx.find_content(slug).await
    }

    /// Replace the document under `slug`. `data` must be a JSON object.
    pub async fn put(
        &self,
        ctx: &RequestContext,
        slug: &str,
        data: Option<serde_json::Value>,
    ) -> AppResult<SiteContent> {
        let data = data
            .filter(serde_json::Value::is_object)
            .ok_or_else(|| AppError::validation("Request body must include a data object"))?;

        let mut tx = self.store.begin().await?;
        let previous = tx.find_content(slug).await?;
        let saved = tx.upsert_content(slug, data).await?;

        let action = if previous.is_some() {
            AuditAction::Update
        } else {
            AuditAction::Create
        };
        let mut entry = NewAuditEntry::new(ctx.user_id, action, EntityType::SiteContent)
            .entity(saved.id)
            .slug(slug)
            .new_data(saved.data.clone());
        if let Some(previous) = previous {
            entry = entry.previous(previous.data);
        }
        tx.insert_audit(entry).await?;
        tx.commit().await?;

        info!(user_id = %ctx.user_id, slug = %slug, action = %action, "Site content saved");
        Ok(saved)
    }
}
