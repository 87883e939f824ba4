//! Newsletter subscriber persistence.

use async_trait::async_trait;

use alwc_core::result::AppResult;
use alwc_core::types::SubscriberId;
use alwc_entity::newsletter::{Subscriber, SubscriberChanges, SubscriberStatus};

#[async_trait]
pub trait SubscriberRepository: Send {
    /// Newest subscription first, optionally filtered by status.
    async fn list_subscribers(
        &mut self,
        status: Option<SubscriberStatus>,
    ) -> AppResult<Vec<Subscriber>>;

    async fn find_subscriber(&mut self, id: SubscriberId) -> AppResult<Option<Subscriber>>;

    /// Case-insensitive.
    async fn find_subscriber_by_email(&mut self, email: &str) -> AppResult<Option<Subscriber>>;

    /// Fails with `Conflict` when the email is already present.
    async fn insert_subscriber(&mut self, email: &str, name: Option<&str>) -> AppResult<Subscriber>;

    /// Mark active again with a fresh `subscribed_at`; a given name replaces
    /// the stored one.
    async fn reactivate_subscriber(
        &mut self,
        id: SubscriberId,
        name: Option<&str>,
    ) -> AppResult<Option<Subscriber>>;

    async fn update_subscriber(
        &mut self,
        id: SubscriberId,
        changes: SubscriberChanges,
    ) -> AppResult<Option<Subscriber>>;

    async fn delete_subscriber(&mut self, id: SubscriberId) -> AppResult<bool>;
}
