//! Site content model.

use alwc_core::types::ContentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A JSON document addressed by page slug (e.g. `home`, `about`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SiteContent {
    pub id: ContentId,
    pub slug: String,
    pub data: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}
