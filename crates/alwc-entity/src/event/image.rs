//! Event gallery image model.

use alwc_core::types::{EventId, EventImageId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One image in an event's gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct EventImage {
    pub id: EventImageId,
    pub event_id: EventId,
    pub image_url: String,
    /// Object storage key; used to delete the object with the row.
    #[serde(skip_serializing, default)]
    pub storage_key: String,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEventImage {
    pub event_id: EventId,
    pub image_url: String,
    pub storage_key: String,
    pub display_order: i32,
}
