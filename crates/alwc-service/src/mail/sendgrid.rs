//! SendGrid v3 mail delivery over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error};

use alwc_core::config::email::EmailConfig;
use alwc_core::error::{AppError, ErrorKind};
use alwc_core::result::AppResult;
use alwc_core::traits::{Mailer, OutgoingEmail};

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<Address<'a>>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

/// Delivers mail through the SendGrid `/v3/mail/send` endpoint.
#[derive(Debug, Clone)]
pub struct SendGridMailer {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    from_address: String,
    from_name: String,
}

impl SendGridMailer {
    pub fn new(config: &EmailConfig, api_key: String) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            client,
            api_key,
            endpoint: format!(
                "{}/v3/mail/send",
                config.sendgrid_base_url.trim_end_matches('/')
            ),
            from_address: config.from_address.clone(),
            from_name: config.from_name.clone(),
        })
    }

    fn request_body<'a>(&'a self, email: &'a OutgoingEmail) -> SendRequest<'a> {
        SendRequest {
            personalizations: vec![Personalization {
                to: vec![Address {
                    email: &email.to,
                    name: None,
                }],
            }],
            from: Address {
                email: &self.from_address,
                name: Some(&self.from_name),
            },
            reply_to: email.reply_to.as_deref().map(|addr| Address {
                email: addr,
                name: None,
            }),
            subject: &email.subject,
            // SendGrid requires text/plain before text/html
            content: vec![
                Content {
                    kind: "text/plain",
                    value: &email.text,
                },
                Content {
                    kind: "text/html",
                    value: &email.html,
                },
            ],
        }
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    fn provider_type(&self) -> &str {
        "sendgrid"
    }

    async fn send(&self, email: OutgoingEmail) -> AppResult<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(&email))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "SendGrid request failed", e)
            })?;

        let status = response.status();
        if status.is_success() {
            debug!(to = %email.to, subject = %email.subject, "Email sent");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %body, to = %email.to, "SendGrid rejected message");
        Err(AppError::external(format!(
            "SendGrid returned {status}"
        )))
    }
}
