//! Outbound email configuration.

use serde::{Deserialize, Serialize};

/// Transactional email settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Provider: `"sendgrid"` or `"log"` (writes messages to the log only).
    #[serde(default = "default_provider")]
    pub provider: String,
    /// SendGrid API key.
    #[serde(default)]
    pub sendgrid_api_key: Option<String>,
    /// SendGrid API base URL.
    #[serde(default = "default_sendgrid_base")]
    pub sendgrid_base_url: String,
    /// Sender address on every outgoing message.
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Sender display name.
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Public frontend origin used to build links in emails.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
    /// Where contact-form messages go; falls back to the primary admin.
    #[serde(default)]
    pub contact_recipient: Option<String>,
    /// Outbound request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            sendgrid_api_key: None,
            sendgrid_base_url: default_sendgrid_base(),
            from_address: default_from_address(),
            from_name: default_from_name(),
            frontend_url: default_frontend_url(),
            contact_recipient: None,
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_provider() -> String {
    "log".to_string()
}

fn default_sendgrid_base() -> String {
    "https://api.sendgrid.com".to_string()
}

fn default_from_address() -> String {
    "noreply@alifeworthcelebrating.org".to_string()
}

fn default_from_name() -> String {
    "A Life Worth Celebrating".to_string()
}

fn default_frontend_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_timeout() -> u64 {
    10
}
