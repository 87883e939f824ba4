//! Forward contact form messages by email.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use alwc_core::error::AppError;
use alwc_core::result::AppResult;
use alwc_core::traits::Mailer;

use crate::mail::MailTemplates;
use crate::validation::{present, require_valid_email};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ContactService {
    mailer: Arc<dyn Mailer>,
    templates: MailTemplates,
    /// Inbox receiving the messages.
    recipient: Option<String>,
}

impl ContactService {
    pub fn new(mailer: Arc<dyn Mailer>, templates: MailTemplates, recipient: Option<String>) -> Self {
        Self {
            mailer,
            templates,
            recipient: recipient.filter(|r| !r.trim().is_empty()),
        }
    }

    pub async fn submit(&self, input: ContactInput) -> AppResult<()> {
        let (Some(name), Some(email), Some(message)) = (
            present(input.name.as_deref()),
            present(input.email.as_deref()),
            present(input.message.as_deref()),
        ) else {
            return Err(AppError::validation("Name, email, and message are required"));
        };
        require_valid_email(email)?;
        let recipient = self
            .recipient
            .as_deref()
            .ok_or_else(|| AppError::misconfigured("No contact recipient configured"))?;

        self.mailer
            .send(self.templates.contact_forward(recipient, name, email, message))
            .await?;
        info!(sender = %email, "Contact form message forwarded");
        Ok(())
    }
}
