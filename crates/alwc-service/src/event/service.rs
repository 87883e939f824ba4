//! Event CRUD and ordering.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use alwc_core::error::AppError;
use alwc_core::result::AppResult;
use alwc_core::traits::ObjectStore;
use alwc_core::types::EventId;
use alwc_database::prelude::*;
use alwc_entity::audit::{AuditAction, EntityType, NewAuditEntry};
use alwc_entity::event::{Event, EventChanges, EventImage, EventWithImages, NewEvent};

use crate::context::RequestContext;
use crate::patch::double_option;
use crate::validation::present;

/// New position for one row in a reorder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    pub id: i64,
    pub display_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_published: Option<bool>,
    #[serde(default)]
    pub display_order: Option<i32>,
}

/// Partial event update; `null` clears an optional field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub time: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub link: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
    #[serde(default)]
    pub is_published: Option<bool>,
    #[serde(default)]
    pub display_order: Option<i32>,
}

impl From<EventUpdate> for EventChanges {
    fn from(update: EventUpdate) -> Self {
        Self {
            title: update.title,
            date: update.date,
            time: update.time,
            location: update.location,
            description: update.description,
            link: update.link,
            image_url: update.image_url,
            is_published: update.is_published,
            display_order: update.display_order,
        }
    }
}

/// Attach each event's gallery.
pub(crate) fn with_images(events: Vec<Event>, images: Vec<EventImage>) -> Vec<EventWithImages> {
    let mut by_event: HashMap<EventId, Vec<EventImage>> = HashMap::new();
    for image in images {
        by_event.entry(image.event_id).or_default().push(image);
    }
    events
        .into_iter()
        .map(|event| EventWithImages {
            images: by_event.remove(&event.id).unwrap_or_default(),
            event,
        })
        .collect()
}

/// Event management.
#[derive(Debug, Clone)]
pub struct EventService {
    store: Arc<dyn Store>,
    objects: Arc<dyn ObjectStore>,
}

impl EventService {
    pub fn new(store: Arc<dyn Store>, objects: Arc<dyn ObjectStore>) -> Self {
        Self { store, objects }
    }

    /// Events with galleries. Public callers see published events only.
    pub async fn list(&self, published_only: bool) -> AppResult<Vec<EventWithImages>> {
        let mut tx = self.store.begin().await?;
        let events = tx.list_events(published_only).await?;
        let ids: Vec<EventId> = events.iter().map(|e| e.id).collect();
        let images = tx.list_images_for_events(&ids).await?;
        Ok(with_images(events, images))
    }

    pub async fn create(&self, ctx: &RequestContext, input: CreateEventInput) -> AppResult<Event> {
        let title = present(input.title.as_deref())
            .ok_or_else(|| AppError::validation("Title is required"))?
            .to_string();

        let mut tx = self.store.begin().await?;
        let event = tx
            .insert_event(NewEvent {
                title,
                date: input.date,
                time: input.time,
                location: input.location,
                description: input.description,
                link: input.link,
                image_url: input.image_url,
                is_published: input.is_published.unwrap_or(true),
                display_order: input.display_order.unwrap_or(0),
            })
            .await?;
        tx.insert_audit(
            NewAuditEntry::new(ctx.user_id, AuditAction::Create, EntityType::Event)
                .entity(event.id)
                .new_data(serde_json::to_value(&event)?),
        )
        .await?;
        tx.commit().await?;

        info!(user_id = %ctx.user_id, event_id = %event.id, title = %event.title, "Event created");
        Ok(event)
    }

    /// Apply new display positions. Ids that no longer exist are skipped.
    pub async fn reorder(&self, ctx: &RequestContext, updates: Vec<OrderUpdate>) -> AppResult<()> {
        if updates.is_empty() {
            return Err(AppError::validation("Updates array is required"));
        }

        let mut tx = self.store.begin().await?;
        for update in &updates {
            tx.set_event_order(EventId(update.id), update.display_order)
                .await?;
        }
        tx.insert_audit(
            NewAuditEntry::new(ctx.user_id, AuditAction::Reorder, EntityType::Event)
                .new_data(serde_json::json!({ "updates": updates })),
        )
        .await?;
        tx.commit().await?;

        info!(user_id = %ctx.user_id, update_count = updates.len(), "Events reordered");
        Ok(())
    }

    /// Partial update. Flipping the published flag is audited as
    /// `publish`/`unpublish`.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: EventId,
        update: EventUpdate,
    ) -> AppResult<Event> {
        if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(AppError::validation("Title is required"));
        }

        let mut tx = self.store.begin().await?;
        let before = tx
            .find_event(id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;
        let after = tx
            .update_event(id, update.into())
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;

        let action = match (before.is_published, after.is_published) {
            (false, true) => AuditAction::Publish,
            (true, false) => AuditAction::Unpublish,
            _ => AuditAction::Update,
        };
        tx.insert_audit(
            NewAuditEntry::new(ctx.user_id, action, EntityType::Event)
                .entity(id)
                .previous(serde_json::to_value(&before)?)
                .new_data(serde_json::to_value(&after)?),
        )
        .await?;
        tx.commit().await?;

        info!(user_id = %ctx.user_id, event_id = %id, action = %action, "Event updated");
        Ok(after)
    }

    /// Delete an event, its gallery rows, and the gallery objects.
    pub async fn delete(&self, ctx: &RequestContext, id: EventId) -> AppResult<()> {
        let mut tx = self.store.begin().await?;
        let event = tx
            .find_event(id)
            .await?
            .ok_or_else(|| AppError::not_found("Event not found"))?;
        let images = tx.list_event_images(id).await?;

        tx.delete_event(id).await?;
        tx.insert_audit(
            NewAuditEntry::new(ctx.user_id, AuditAction::Delete, EntityType::Event)
                .entity(id)
                .previous(serde_json::to_value(EventWithImages {
                    event,
                    images: images.clone(),
                })?),
        )
        .await?;
        tx.commit().await?;

        for image in &images {
            if let Err(e) = self.objects.delete(&image.storage_key).await {
                warn!(event_id = %id, key = %image.storage_key, error = %e, "Failed to delete gallery object");
            }
        }

        info!(user_id = %ctx.user_id, event_id = %id, image_count = images.len(), "Event deleted");
        Ok(())
    }
}
