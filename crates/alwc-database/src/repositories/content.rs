//! Site content persistence.

use async_trait::async_trait;

use alwc_core::result::AppResult;
use alwc_entity::content::SiteContent;

#[async_trait]
pub trait ContentRepository: Send {
    async fn find_content(&mut self, slug: &str) -> AppResult<Option<SiteContent>>;

    async fn upsert_content(&mut self, slug: &str, data: serde_json::Value)
    -> AppResult<SiteContent>;
}
