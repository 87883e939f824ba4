//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field has a default so a bare environment still yields a
//! usable development configuration.

pub mod admin;
pub mod app;
pub mod auth;
pub mod database;
pub mod email;
pub mod logging;
pub mod rate_limit;
pub mod storage;

use serde::{Deserialize, Serialize};

use self::admin::AdminConfig;
use self::app::ServerConfig;
use self::auth::AuthConfig;
use self::database::DatabaseConfig;
use self::email::EmailConfig;
use self::logging::LoggingConfig;
use self::rate_limit::RateLimitConfig;
use self::storage::StorageConfig;

use crate::error::AppError;

/// Environment variable prefix for overrides (`ALWC__AUTH__JWT_SECRET`).
pub const ENV_PREFIX: &str = "ALWC";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Session and password settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Primary admin identity and bootstrap credentials.
    #[serde(default)]
    pub admin: AdminConfig,
    /// Object storage for uploaded images.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Outbound email delivery.
    #[serde(default)]
    pub email: EmailConfig,
    /// Per-client request throttling.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `ALWC__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config", env)
    }

    /// Load configuration rooted at an explicit directory.
    pub fn load_from(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::misconfigured(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::misconfigured(format!("Failed to deserialize config: {e}")))
    }
}
