//! Event gallery persistence.

use async_trait::async_trait;

use alwc_core::result::AppResult;
use alwc_core::types::{EventId, EventImageId};
use alwc_entity::event::{EventImage, NewEventImage};

#[async_trait]
pub trait EventImageRepository: Send {
    /// Images for one event ordered by `display_order`, then id.
    async fn list_event_images(&mut self, event_id: EventId) -> AppResult<Vec<EventImage>>;

    /// Images for many events, same ordering within each event.
    async fn list_images_for_events(&mut self, event_ids: &[EventId]) -> AppResult<Vec<EventImage>>;

    /// Matches only when the image belongs to `event_id`.
    async fn find_event_image(
        &mut self,
        event_id: EventId,
        image_id: EventImageId,
    ) -> AppResult<Option<EventImage>>;

    /// Highest `display_order` in the gallery, `None` when empty.
    async fn max_image_order(&mut self, event_id: EventId) -> AppResult<Option<i32>>;

    async fn insert_event_image(&mut self, image: NewEventImage) -> AppResult<EventImage>;

    /// Returns whether the image exists in that event's gallery.
    async fn set_image_order(
        &mut self,
        event_id: EventId,
        image_id: EventImageId,
        display_order: i32,
    ) -> AppResult<bool>;

    async fn delete_event_image(&mut self, id: EventImageId) -> AppResult<bool>;
}
