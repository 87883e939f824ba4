//! Outbound email trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A fully rendered message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

/// Transactional email delivery.
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug + 'static {
    /// Provider name for logging (e.g., "sendgrid", "log").
    fn provider_type(&self) -> &str;

    /// Deliver one message. Errors are `ExternalService` failures.
    async fn send(&self, email: OutgoingEmail) -> AppResult<()>;
}
