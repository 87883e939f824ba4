//! Request throttling configuration.

use serde::{Deserialize, Serialize};

/// Token-bucket limits keyed by client IP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Applied to every `/api` request.
    #[serde(default = "default_api")]
    pub api: BucketConfig,
    /// Applied to login attempts.
    #[serde(default = "default_login")]
    pub login: BucketConfig,
    /// Applied to forgot-password and reset-password.
    #[serde(default = "default_password_reset")]
    pub password_reset: BucketConfig,
    /// Applied to the public contact form.
    #[serde(default = "default_contact")]
    pub contact: BucketConfig,
}

/// `max_requests` per `window_seconds`, refilled continuously.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BucketConfig {
    pub max_requests: u32,
    pub window_seconds: u64,
}

impl BucketConfig {
    /// Tokens restored per second.
    pub fn refill_rate(&self) -> f64 {
        if self.window_seconds == 0 {
            return f64::from(self.max_requests);
        }
        f64::from(self.max_requests) / self.window_seconds as f64
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api: default_api(),
            login: default_login(),
            password_reset: default_password_reset(),
            contact: default_contact(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_api() -> BucketConfig {
    BucketConfig {
        max_requests: 100,
        window_seconds: 15 * 60,
    }
}

fn default_login() -> BucketConfig {
    BucketConfig {
        max_requests: 5,
        window_seconds: 15 * 60,
    }
}

fn default_password_reset() -> BucketConfig {
    BucketConfig {
        max_requests: 3,
        window_seconds: 60 * 60,
    }
}

fn default_contact() -> BucketConfig {
    BucketConfig {
        max_requests: 5,
        window_seconds: 60 * 60,
    }
}
