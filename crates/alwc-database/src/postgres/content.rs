use async_trait::async_trait;

use alwc_core::result::AppResult;
use alwc_entity::content::SiteContent;

use super::{PgTx, db_error};
use crate::repositories::ContentRepository;

#[async_trait]
impl ContentRepository for PgTx {
    async fn find_content(&mut self, slug: &str) -> AppResult<Option<SiteContent>> {
        sqlx::query_as::<_, SiteContent>(
            "SELECT id, slug, data, updated_at FROM site_content WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("Failed to load site content"))
    }

    async fn upsert_content(
        &mut self,
        slug: &str,
        data: serde_json::Value,
    ) -> AppResult<SiteContent> {
        sqlx::query_as::<_, SiteContent>(
            "INSERT INTO site_content (slug, data) VALUES ($1, $2) \
             ON CONFLICT (slug) DO UPDATE SET data = EXCLUDED.data, updated_at = NOW() \
             RETURNING id, slug, data, updated_at",
        )
        .bind(slug)
        .bind(data)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(db_error("Failed to save site content"))
    }
}
