//! Event image galleries backed by object storage.

use std::sync::Arc;

use tracing::{info, warn};

use alwc_core::error::AppError;
use alwc_core::result::AppResult;
use alwc_core::traits::ObjectStore;
use alwc_core::types::{EventId, EventImageId};
use alwc_database::prelude::*;
use alwc_entity::audit::{AuditAction, EntityType, NewAuditEntry};
use alwc_entity::event::{EventImage, NewEventImage};
use alwc_storage::keys::ObjectKey;

use crate::context::RequestContext;
use crate::upload::{UploadLimits, UploadedFile};

/// An object written to storage but not yet recorded in the database.
#[derive(Debug)]
struct StoredObject {
    key: String,
    url: String,
}

/// Manages gallery images for events.
#[derive(Debug, Clone)]
pub struct GalleryService {
    store: Arc<dyn Store>,
    objects: Arc<dyn ObjectStore>,
    limits: UploadLimits,
}

impl GalleryService {
    pub fn new(store: Arc<dyn Store>, objects: Arc<dyn ObjectStore>, limits: UploadLimits) -> Self {
        Self {
            store,
            objects,
            limits,
        }
    }

    pub async fn list(&self, event_id: EventId) -> AppResult<Vec<EventImage>> {
        let mut tx = self.store.begin().await?;
        tx.list_event_images(event_id).await
    }

    async fn discard(&self, stored: &[StoredObject]) {
        for object in stored {
            if let Err(e) = self.objects.delete(&object.key).await {
                warn!(key = %object.key, error = %e, "Failed to remove orphaned upload");
            }
        }
    }

    /// Store the files and append them to the end of the gallery.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        event_id: EventId,
        files: Vec<UploadedFile>,
    ) -> AppResult<Vec<EventImage>> {
        self.limits.check(&files)?;
        {
            let mut tx = self.store.begin().await?;
            if tx.find_event(event_id).await?.is_none() {
                return Err(AppError::not_found("Event not found"));
            }
        }

        let mut stored = Vec::with_capacity(files.len());
        for file in files {
            let key = ObjectKey::event_image(
                event_id.get(),
                file.file_name.as_deref(),
                &file.content_type,
            )
            .into_string();
            match self.objects.put(&key, file.data, &file.content_type).await {
                Ok(url) => stored.push(StoredObject { key, url }),
                Err(e) => {
                    self.discard(&stored).await;
                    return Err(e);
                }
            }
        }

        match self.record_uploads(ctx, event_id, &stored).await {
            Ok(images) => {
                info!(
                    user_id = %ctx.user_id,
                    event_id = %event_id,
                    count = images.len(),
                    "Gallery images uploaded"
                );
                Ok(images)
            }
            Err(e) => {
                self.discard(&stored).await;
                Err(e)
            }
        }
    }

    async fn record_uploads(
        &self,
        ctx: &RequestContext,
        event_id: EventId,
        stored: &[StoredObject],
    ) -> AppResult<Vec<EventImage>> {
        let mut tx = self.store.begin().await?;
        if tx.find_event(event_id).await?.is_none() {
            return Err(AppError::not_found("Event not found"));
        }
        let mut next_order = tx.max_image_order(event_id).await?.map_or(0, |max| max + 1);

        let mut images = Vec::with_capacity(stored.len());
        for object in stored {
            let image = tx
                .insert_event_image(NewEventImage {
                    event_id,
                    image_url: object.url.clone(),
                    storage_key: object.key.clone(),
                    display_order: next_order,
                })
                .await?;
            next_order += 1;
            images.push(image);
        }

        tx.insert_audit(
            NewAuditEntry::new(ctx.user_id, AuditAction::Create, EntityType::EventImages)
                .entity(event_id)
                .new_data(serde_json::json!({
                    "count": images.len(),
                    "images": images,
                })),
        )
        .await?;
        tx.commit().await?;
        Ok(images)
    }

    /// Remove one image row and its stored object.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        event_id: EventId,
        image_id: EventImageId,
    ) -> AppResult<()> {
        let mut tx = self.store.begin().await?;
        let image = tx
            .find_event_image(event_id, image_id)
            .await?
            .ok_or_else(|| AppError::not_found("Image not found"))?;
        tx.delete_event_image(image_id).await?;
        tx.insert_audit(
            NewAuditEntry::new(ctx.user_id, AuditAction::Delete, EntityType::EventImage)
                .entity(image_id)
                .previous(serde_json::to_value(&image)?),
        )
        .await?;
        tx.commit().await?;

        if let Err(e) = self.objects.delete(&image.storage_key).await {
            warn!(image_id = %image_id, key = %image.storage_key, error = %e, "Failed to delete gallery object");
        }
        info!(user_id = %ctx.user_id, event_id = %event_id, image_id = %image_id, "Gallery image deleted");
        Ok(())
    }

    /// Positions follow the order of `image_ids`. Ids outside this gallery
    /// are skipped.
    pub async fn reorder(
        &self,
        ctx: &RequestContext,
        event_id: EventId,
        image_ids: Vec<i64>,
    ) -> AppResult<()> {
        let mut tx = self.store.begin().await?;
        for (position, id) in image_ids.iter().enumerate() {
            let order = i32::try_from(position)
                .map_err(|_| AppError::validation("Too many images to reorder"))?;
            tx.set_image_order(event_id, EventImageId(*id), order).await?;
        }
        tx.insert_audit(
            NewAuditEntry::new(ctx.user_id, AuditAction::Reorder, EntityType::EventImages)
                .entity(event_id)
                .new_data(serde_json::json!({ "imageIds": image_ids })),
        )
        .await?;
        tx.commit().await?;

        info!(user_id = %ctx.user_id, event_id = %event_id, count = image_ids.len(), "Gallery reordered");
        Ok(())
    }
}
