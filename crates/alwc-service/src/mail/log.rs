//! Log-only mailer for development.

use async_trait::async_trait;
use tracing::info;

use alwc_core::result::AppResult;
use alwc_core::traits::{Mailer, OutgoingEmail};

/// Writes each message to the log instead of sending it. Reset and
/// welcome links show up in the log output.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    fn provider_type(&self) -> &str {
        "log"
    }

    async fn send(&self, email: OutgoingEmail) -> AppResult<()> {
        info!(
            to = %email.to,
            subject = %email.subject,
            reply_to = ?email.reply_to,
            body = %email.text,
            "Email (not sent, log provider)"
        );
        Ok(())
    }
}
