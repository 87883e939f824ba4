//! Event persistence.

use async_trait::async_trait;

use alwc_core::result::AppResult;
use alwc_core::types::EventId;
use alwc_entity::event::{Event, EventChanges, NewEvent};

#[async_trait]
pub trait EventRepository: Send {
    /// Ordered by `display_order`, then most recently updated.
    async fn list_events(&mut self, published_only: bool) -> AppResult<Vec<Event>>;

    async fn find_event(&mut self, id: EventId) -> AppResult<Option<Event>>;

    async fn insert_event(&mut self, event: NewEvent) -> AppResult<Event>;

    /// Bumps `updated_at`. `None` when the event does not exist.
    async fn update_event(&mut self, id: EventId, changes: EventChanges) -> AppResult<Option<Event>>;

    /// Returns whether the event exists.
    async fn set_event_order(&mut self, id: EventId, display_order: i32) -> AppResult<bool>;

    /// Gallery rows go with it.
    async fn delete_event(&mut self, id: EventId) -> AppResult<bool>;
}
