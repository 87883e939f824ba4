//! Subscriber management and newsletter delivery.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Deserialize;
use tracing::{error, info};

use alwc_core::error::AppError;
use alwc_core::result::AppResult;
use alwc_core::traits::Mailer;
use alwc_core::types::SubscriberId;
use alwc_database::prelude::*;
use alwc_entity::audit::{AuditAction, EntityType, NewAuditEntry};
use alwc_entity::newsletter::{Subscriber, SubscriberChanges, SubscriberStatus};

use crate::context::RequestContext;
use crate::mail::MailTemplates;
use crate::patch::double_option;
use crate::validation::{present, require_valid_email};

use super::export::subscribers_csv;

/// Deliveries in flight at once while sending a newsletter.
const SEND_CONCURRENCY: usize = 8;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriberInput {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriberUpdate {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendNewsletterInput {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// `"all"` includes unsubscribed addresses; anything else means active
    /// only.
    #[serde(default)]
    pub recipients: Option<String>,
}

/// Outcome of adding a subscriber.
#[derive(Debug, Clone)]
pub enum Subscribed {
    Created(Subscriber),
    Reactivated(Subscriber),
}

#[derive(Debug, Clone)]
pub struct NewsletterService {
    store: Arc<dyn Store>,
    mailer: Arc<dyn Mailer>,
    templates: MailTemplates,
}

impl NewsletterService {
    pub fn new(store: Arc<dyn Store>, mailer: Arc<dyn Mailer>, templates: MailTemplates) -> Self {
        Self {
            store,
            mailer,
            templates,
        }
    }

    /// Newest subscription first.
    pub async fn list(&self) -> AppResult<Vec<Subscriber>> {
        let mut tx = self.store.begin().await?;
        tx.list_subscribers(None).await
    }

    /// Add an address. An unsubscribed address is reactivated instead.
    pub async fn subscribe(
        &self,
        ctx: &RequestContext,
        input: SubscriberInput,
    ) -> AppResult<Subscribed> {
        let email = present(input.email.as_deref())
            .ok_or_else(|| AppError::validation("Email is required"))?;
        require_valid_email(email)?;
        let name = present(input.name.as_deref());

        let mut tx = self.store.begin().await?;
        let outcome = match tx.find_subscriber_by_email(email).await? {
            Some(existing) if existing.status == SubscriberStatus::Active => {
                return Err(AppError::validation("Email already subscribed"));
            }
            Some(existing) => {
                let subscriber = tx
                    .reactivate_subscriber(existing.id, name)
                    .await?
                    .ok_or_else(|| AppError::not_found("Subscriber not found"))?;
                tx.insert_audit(
                    NewAuditEntry::new(
                        ctx.user_id,
                        AuditAction::Resubscribe,
                        EntityType::NewsletterSubscriber,
                    )
                    .entity(subscriber.id)
                    .previous(serde_json::json!({ "status": existing.status }))
                    .new_data(subscriber.snapshot()),
                )
                .await?;
                Subscribed::Reactivated(subscriber)
            }
            None => {
                let subscriber = tx.insert_subscriber(email, name).await?;
                tx.insert_audit(
                    NewAuditEntry::new(
                        ctx.user_id,
                        AuditAction::Create,
                        EntityType::NewsletterSubscriber,
                    )
                    .entity(subscriber.id)
                    .new_data(subscriber.snapshot()),
                )
                .await?;
                Subscribed::Created(subscriber)
            }
        };
        tx.commit().await?;

        info!(user_id = %ctx.user_id, "Newsletter subscriber added");
        Ok(outcome)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: SubscriberId,
        update: SubscriberUpdate,
    ) -> AppResult<Subscriber> {
        let email = match present(update.email.as_deref()) {
            Some(email) => {
                require_valid_email(email)?;
                Some(email.to_string())
            }
            None => None,
        };
        let status = match present(update.status.as_deref()) {
            Some(raw) => Some(raw.parse::<SubscriberStatus>()?),
            None => None,
        };
        let changes = SubscriberChanges {
            email,
            name: update
                .name
                .map(|name| name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())),
            status,
        };

        let mut tx = self.store.begin().await?;
        let before = tx
            .find_subscriber(id)
            .await?
            .ok_or_else(|| AppError::not_found("Subscriber not found"))?;
        let after = tx
            .update_subscriber(id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("Subscriber not found"))?;
        tx.insert_audit(
            NewAuditEntry::new(ctx.user_id, AuditAction::Update, EntityType::NewsletterSubscriber)
                .entity(id)
                .previous(before.snapshot())
                .new_data(after.snapshot()),
        )
        .await?;
        tx.commit().await?;

        info!(user_id = %ctx.user_id, subscriber_id = %id, "Newsletter subscriber updated");
        Ok(after)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: SubscriberId) -> AppResult<()> {
        let mut tx = self.store.begin().await?;
        let subscriber = tx
            .find_subscriber(id)
            .await?
            .ok_or_else(|| AppError::not_found("Subscriber not found"))?;
        tx.delete_subscriber(id).await?;
        tx.insert_audit(
            NewAuditEntry::new(ctx.user_id, AuditAction::Delete, EntityType::NewsletterSubscriber)
                .entity(id)
                .previous(subscriber.snapshot()),
        )
        .await?;
        tx.commit().await?;

        info!(user_id = %ctx.user_id, subscriber_id = %id, "Newsletter subscriber deleted");
        Ok(())
    }

    /// Email every selected subscriber. Returns how many were sent to.
    /// Any delivery failure fails the request after the audit entry is
    /// written, so partial sends stay on record.
    pub async fn send(&self, ctx: &RequestContext, input: SendNewsletterInput) -> AppResult<usize> {
        let (Some(subject), Some(message)) = (
            present(input.subject.as_deref()),
            present(input.message.as_deref()),
        ) else {
            return Err(AppError::validation("Subject and message are required"));
        };
        let filter = match input.recipients.as_deref() {
            Some("all") => "all",
            _ => "active",
        };

        let subscribers = {
            let mut tx = self.store.begin().await?;
            let status = (filter == "active").then_some(SubscriberStatus::Active);
            tx.list_subscribers(status).await?
        };
        if subscribers.is_empty() {
            return Err(AppError::validation("No subscribers found"));
        }

        // Collected up front so the stream's type holds no borrowing closure,
        // which trips the `Send` check on the handler future.
        let sends: Vec<_> = subscribers
            .iter()
            .map(|s| self.mailer.send(self.templates.newsletter(&s.email, subject, message)))
            .collect();
        let results: Vec<AppResult<()>> = stream::iter(sends)
            .buffer_unordered(SEND_CONCURRENCY)
            .collect()
            .await;
        let failed = results.iter().filter(|r| r.is_err()).count();
        let recipients = subscribers.len();

        let mut tx = self.store.begin().await?;
        tx.insert_audit(
            NewAuditEntry::new(ctx.user_id, AuditAction::SendNewsletter, EntityType::Newsletter)
                .new_data(serde_json::json!({
                    "subject": subject,
                    "recipients": recipients,
                    "failed": failed,
                    "filter": filter,
                })),
        )
        .await?;
        tx.commit().await?;

        if failed > 0 {
            error!(user_id = %ctx.user_id, recipients, failed, "Newsletter delivery incomplete");
            return Err(AppError::external(format!(
                "Newsletter failed for {failed} of {recipients} subscribers"
            )));
        }

        info!(user_id = %ctx.user_id, recipients, filter, "Newsletter sent");
        Ok(recipients)
    }

    pub async fn export_csv(&self) -> AppResult<String> {
        Ok(subscribers_csv(&self.list().await?))
    }
}
