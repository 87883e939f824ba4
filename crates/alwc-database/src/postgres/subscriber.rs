use async_trait::async_trait;

use alwc_core::result::AppResult;
use alwc_core::types::SubscriberId;
use alwc_entity::newsletter::{Subscriber, SubscriberChanges, SubscriberStatus};

use super::{PgTx, db_error, unique_or_db_error};
use crate::repositories::SubscriberRepository;

const SUBSCRIBER_COLUMNS: &str =
    "id, email, name, status, subscribed_at, unsubscribed_at, created_at";

const ALREADY_SUBSCRIBED: &str = "Email already subscribed";

#[async_trait]
impl SubscriberRepository for PgTx {
    async fn list_subscribers(
        &mut self,
        status: Option<SubscriberStatus>,
    ) -> AppResult<Vec<Subscriber>> {
        sqlx::query_as::<_, Subscriber>(&format!(
            "SELECT {SUBSCRIBER_COLUMNS} FROM newsletter_subscribers \
             WHERE ($1::subscriber_status IS NULL OR status = $1) \
             ORDER BY subscribed_at DESC, id DESC"
        ))
        .bind(status)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(db_error("Failed to list subscribers"))
    }

    async fn find_subscriber(&mut self, id: SubscriberId) -> AppResult<Option<Subscriber>> {
        sqlx::query_as::<_, Subscriber>(&format!(
            "SELECT {SUBSCRIBER_COLUMNS} FROM newsletter_subscribers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("Failed to find subscriber"))
    }

    async fn find_subscriber_by_email(&mut self, email: &str) -> AppResult<Option<Subscriber>> {
        sqlx::query_as::<_, Subscriber>(&format!(
            "SELECT {SUBSCRIBER_COLUMNS} FROM newsletter_subscribers WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email.trim())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("Failed to find subscriber by email"))
    }

    async fn insert_subscriber(&mut self, email: &str, name: Option<&str>) -> AppResult<Subscriber> {
        sqlx::query_as::<_, Subscriber>(&format!(
            "INSERT INTO newsletter_subscribers (email, name) VALUES ($1, $2) \
             RETURNING {SUBSCRIBER_COLUMNS}"
        ))
        .bind(email.trim())
        .bind(name)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(unique_or_db_error("Failed to add subscriber", ALREADY_SUBSCRIBED))
    }

    async fn reactivate_subscriber(
        &mut self,
        id: SubscriberId,
        name: Option<&str>,
    ) -> AppResult<Option<Subscriber>> {
        sqlx::query_as::<_, Subscriber>(&format!(
            "UPDATE newsletter_subscribers SET \
                 status = 'active', subscribed_at = NOW(), unsubscribed_at = NULL, \
                 name = COALESCE($2, name) \
             WHERE id = $1 RETURNING {SUBSCRIBER_COLUMNS}"
        ))
        .bind(id)
        .bind(name)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_error("Failed to reactivate subscriber"))
    }

    async fn update_subscriber(
        &mut self,
        id: SubscriberId,
        changes: SubscriberChanges,
    ) -> AppResult<Option<Subscriber>> {
        let name_given = changes.name.is_some();
        sqlx::query_as::<_, Subscriber>(&format!(
            "UPDATE newsletter_subscribers SET \
                 email = COALESCE($2, email), \
                 name = CASE WHEN $3 THEN $4 ELSE name END, \
                 status = COALESCE($5, status), \
                 unsubscribed_at = CASE \
                     WHEN $5 = 'unsubscribed' AND status <> 'unsubscribed' THEN NOW() \
                     WHEN $5 = 'active' THEN NULL \
                     ELSE unsubscribed_at END \
             WHERE id = $1 RETURNING {SUBSCRIBER_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.email)
        .bind(name_given)
        .bind(changes.name.flatten())
        .bind(changes.status)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(unique_or_db_error("Failed to update subscriber", ALREADY_SUBSCRIBED))
    }

    async fn delete_subscriber(&mut self, id: SubscriberId) -> AppResult<bool> {
        sqlx::query("DELETE FROM newsletter_subscribers WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map(|r| r.rows_affected() > 0)
            .map_err(db_error("Failed to delete subscriber"))
    }
}
