//! ALWC site backend server.
//!
//! Loads configuration, wires every crate together, and serves the API
//! until Ctrl-C or SIGTERM.

use tracing_subscriber::{EnvFilter, fmt};

use alwc_core::config::AppConfig;
use alwc_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// `config/default.toml`, then `config/$ALWC_ENV.toml`, then `ALWC__*`
/// variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let dir = std::env::var("ALWC_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("ALWC_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load_from(&dir, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.server.environment,
        "Starting ALWC server"
    );

    let state = alwc_api::build_state(config).await?;
    alwc_api::run_server(state).await
}
