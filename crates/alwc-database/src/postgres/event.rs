use async_trait::async_trait;

use alwc_core::result::AppResult;
use alwc_core::types::{EventId, EventImageId};
use alwc_entity::event::{Event, EventChanges, EventImage, NewEvent, NewEventImage};

use super::{PgTx, db_error};
use crate::repositories::{EventImageRepository, EventRepository};

const EVENT_COLUMNS: &str = "id, title, date, time, location, description, link, image_url, \
                             is_published, display_order, created_at, updated_at";

const IMAGE_COLUMNS: &str = "id, event_id, image_url, storage_key, display_order, created_at";

#[async_trait]
impl EventRepository for PgTx {
    async fn list_events(&mut self, published_only: bool) -> AppResult<Vec<Event>> {
        sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events \
             WHERE ($1 = FALSE OR is_published = TRUE) \
             ORDER BY display_order ASC, updated_at DESC, id DESC"
        ))
        .bind(published_only)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(db_error("Failed to list events"))
    }

    async fn find_event(&mut self, id: EventId) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>(&format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(db_error("Failed to find event"))
    }

    async fn insert_event(&mut self, event: NewEvent) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(&format!(
            "INSERT INTO events \
                 (title, date, time, location, description, link, image_url, is_published, display_order) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {EVENT_COLUMNS}"
        ))
        .bind(&event.title)
        .bind(&event.date)
        .bind(&event.time)
        .bind(&event.location)
        .bind(&event.description)
        .bind(&event.link)
        .bind(&event.image_url)
        .bind(event.is_published)
        .bind(event.display_order)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(db_error("Failed to create event"))
    }

    async fn update_event(
        &mut self,
        id: EventId,
        changes: EventChanges,
    ) -> AppResult<Option<Event>> {
        let current = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("Failed to load event for update"))?;

        let Some(current) = current else {
            return Ok(None);
        };
        let next = changes.apply_to(&current);

        sqlx::query_as::<_, Event>(&format!(
            "UPDATE events SET \
                 title = $2, date = $3, time = $4, location = $5, description = $6, \
                 link = $7, image_url = $8, is_published = $9, display_order = $10, \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING {EVENT_COLUMNS}"
        ))
        .bind(id)
        .bind(&next.title)
        .bind(&next.date)
        .bind(&next.time)
        .bind(&next.location)
        .bind(&next.description)
        .bind(&next.link)
        .bind(&next.image_url)
        .bind(next.is_published)
        .bind(next.display_order)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("Failed to update event"))
    }

    async fn set_event_order(&mut self, id: EventId, display_order: i32) -> AppResult<bool> {
        sqlx::query("UPDATE events SET display_order = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(display_order)
            .execute(&mut *self.tx)
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(db_error("Failed to reorder event"))
    }

    async fn delete_event(&mut self, id: EventId) -> AppResult<bool> {
        sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(db_error("Failed to delete event"))
    }
}

#[async_trait]
impl EventImageRepository for PgTx {
    async fn list_event_images(&mut self, event_id: EventId) -> AppResult<Vec<EventImage>> {
        sqlx::query_as::<_, EventImage>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM event_images WHERE event_id = $1 \
             ORDER BY display_order ASC, id ASC"
        ))
        .bind(event_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(db_error("Failed to list event images"))
    }

    async fn list_images_for_events(&mut self, event_ids: &[EventId]) -> AppResult<Vec<EventImage>> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = event_ids.iter().map(|id| id.get()).collect();
        sqlx::query_as::<_, EventImage>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM event_images WHERE event_id = ANY($1) \
             ORDER BY event_id, display_order ASC, id ASC"
        ))
        .bind(ids)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(db_error("Failed to list gallery images"))
    }

    async fn find_event_image(
        &mut self,
        event_id: EventId,
        image_id: EventImageId,
    ) -> AppResult<Option<EventImage>> {
        sqlx::query_as::<_, EventImage>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM event_images WHERE id = $1 AND event_id = $2"
        ))
        .bind(image_id)
        .bind(event_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("Failed to find event image"))
    }

    async fn max_image_order(&mut self, event_id: EventId) -> AppResult<Option<i32>> {
        sqlx::query_scalar::<_, Option<i32>>(
            "SELECT MAX(display_order) FROM event_images WHERE event_id = $1",
        )
        .bind(event_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(db_error("Failed to read gallery order"))
    }

    async fn insert_event_image(&mut self, image: NewEventImage) -> AppResult<EventImage> {
        sqlx::query_as::<_, EventImage>(&format!(
            "INSERT INTO event_images (event_id, image_url, storage_key, display_order) \
             VALUES ($1, $2, $3, $4) RETURNING {IMAGE_COLUMNS}"
        ))
        .bind(image.event_id)
        .bind(&image.image_url)
        .bind(&image.storage_key)
        .bind(image.display_order)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(db_error("Failed to store event image"))
    }

    async fn set_image_order(
        &mut self,
        event_id: EventId,
        image_id: EventImageId,
        display_order: i32,
    ) -> AppResult<bool> {
        sqlx::query("UPDATE event_images SET display_order = $3 WHERE id = $1 AND event_id = $2")
            .bind(image_id)
            .bind(event_id)
            .bind(display_order)
            .execute(&mut *self.tx)
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(db_error("Failed to reorder event image"))
    }

    async fn delete_event_image(&mut self, id: EventImageId) -> AppResult<bool> {
        sqlx::query("DELETE FROM event_images WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(db_error("Failed to delete event image"))
    }
}
