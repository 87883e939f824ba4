//! Mailer selection from configuration.

use std::sync::Arc;

use tracing::{info, warn};

use alwc_core::config::email::EmailConfig;
use alwc_core::error::AppError;
use alwc_core::result::AppResult;
use alwc_core::traits::Mailer;

use super::{LogMailer, SendGridMailer};

/// Build the configured mailer.
pub fn build_mailer(config: &EmailConfig) -> AppResult<Arc<dyn Mailer>> {
    match config.provider.as_str() {
        "sendgrid" => {
            let api_key = config
                .sendgrid_api_key
                .clone()
                .filter(|k| !k.is_empty())
                .ok_or_else(|| {
                    AppError::misconfigured("email.sendgrid_api_key is required for sendgrid")
                })?;
            info!(from = %config.from_address, "Using SendGrid mailer");
            Ok(Arc::new(SendGridMailer::new(config, api_key)?))
        }
        "log" => {
            warn!("Using log mailer; no email will be delivered");
            Ok(Arc::new(LogMailer))
        }
        other => Err(AppError::misconfigured(format!(
            "Unknown email provider: {other}"
        ))),
    }
}
