//! Event entity model.

use alwc_core::types::EventId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::image::EventImage;

/// A calendar entry on the public events page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    /// Free-form display date as entered by editors.
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    /// Cover image URL.
    pub image_url: Option<String>,
    pub is_published: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An event with its gallery attached, as returned by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventWithImages {
    #[serde(flatten)]
    pub event: Event,
    pub images: Vec<EventImage>,
}

/// Data required to create an event.
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub title: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub display_order: i32,
}

/// Partial event update. Outer `None` leaves a column untouched; for
/// nullable columns `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct EventChanges {
    pub title: Option<String>,
    pub date: Option<Option<String>>,
    pub time: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub link: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
    pub is_published: Option<bool>,
    pub display_order: Option<i32>,
}

impl EventChanges {
    /// Apply the changes to a copy of `event`.
    pub fn apply_to(&self, event: &Event) -> Event {
        let mut next = event.clone();
        if let Some(title) = &self.title {
            next.title = title.clone();
        }
        if let Some(date) = &self.date {
            next.date = date.clone();
        }
        if let Some(time) = &self.time {
            next.time = time.clone();
        }
        if let Some(location) = &self.location {
            next.location = location.clone();
        }
        if let Some(description) = &self.description {
            next.description = description.clone();
        }
        if let Some(link) = &self.link {
            next.link = link.clone();
        }
        if let Some(image_url) = &self.image_url {
            next.image_url = image_url.clone();
        }
        if let Some(is_published) = self.is_published {
            next.is_published = is_published;
        }
        if let Some(display_order) = self.display_order {
            next.display_order = display_order;
        }
        next
    }
}
