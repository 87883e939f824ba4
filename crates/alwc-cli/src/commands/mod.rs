//! CLI command definitions and dispatch.

pub mod audit;
pub mod migrate;
pub mod serve;
pub mod user;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use crate::output::OutputFormat;
use alwc_core::config::AppConfig;
use alwc_core::config::logging::LoggingConfig;
use alwc_core::error::AppError;
use alwc_database::Store;

/// ALWC site backend: server and operator tools
#[derive(Debug, Parser)]
#[command(name = "alwc", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `default.toml` and the environment overlays
    #[arg(short, long, default_value = "config")]
    pub config: String,

    /// Environment overlay to apply on top of `default.toml`
    #[arg(short, long, env = "ALWC_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Audit log
    Audit(audit::AuditArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_from(&self.config, &self.env)?;

        match &self.command {
            Commands::Serve(args) => {
                init_logging(Some(&config.logging));
                serve::execute(args, config).await
            }
            Commands::Migrate(args) => {
                init_logging(None);
                migrate::execute(args, &config, self.format).await
            }
            Commands::User(args) => {
                init_logging(None);
                user::execute(args, config, self.format).await
            }
            Commands::Audit(args) => {
                init_logging(None);
                audit::execute(args, &config, self.format).await
            }
        }
    }
}

/// Install the tracing subscriber. `RUST_LOG` wins over configuration;
/// maintenance commands default to `warn` so their output stays readable.
fn init_logging(config: Option<&LoggingConfig>) {
    let level = config.map_or("warn", |c| c.level.as_str());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match config.map(|c| c.format.as_str()) {
        Some("json") => fmt().json().with_env_filter(filter).with_target(true).init(),
        Some(_) => fmt().pretty().with_env_filter(filter).with_target(true).init(),
        None => fmt().with_env_filter(filter).init(),
    }
}

/// Open the configured store, honouring `database.run_migrations`.
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn Store>, AppError> {
    alwc_api::connect_store(&config.database).await
}
