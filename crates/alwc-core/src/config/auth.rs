//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Session token and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256). Login and every guarded
    /// route fail with a configuration error while this is unset.
    #[serde(default)]
    pub jwt_secret: Option<String>,
    /// Session token lifetime in days. Fixed at issuance, never renewed.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_days: i64,
    /// Password reset token lifetime in minutes.
    #[serde(default = "default_reset_ttl")]
    pub reset_token_ttl_minutes: i64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Name of the HTTP-only cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            session_ttl_days: default_session_ttl(),
            reset_token_ttl_minutes: default_reset_ttl(),
            password_min_length: default_password_min(),
            cookie_name: default_cookie_name(),
        }
    }
}

fn default_session_ttl() -> i64 {
    7
}

fn default_reset_ttl() -> i64 {
    60
}

fn default_password_min() -> usize {
    8
}

fn default_cookie_name() -> String {
    "token".to_string()
}
