//! Application builder: wires configuration, storage, and services into an
//! Axum app and runs it.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use alwc_core::config::AppConfig;
use alwc_core::config::database::DatabaseConfig;
use alwc_core::error::{AppError, ErrorKind};
use alwc_core::result::AppResult;
use alwc_database::connection::mask_password;
use alwc_database::migration::run_migrations;
use alwc_database::{DatabasePool, MemoryStore, PgStore, Store};
use alwc_service::ensure_primary_admin;
use alwc_service::mail::build_mailer;
use alwc_storage::build_object_store;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Open the configured store: `memory://` or PostgreSQL, migrated when
/// `database.run_migrations` is set.
pub async fn connect_store(config: &DatabaseConfig) -> AppResult<Arc<dyn Store>> {
    if config.is_memory() {
        info!("Using in-memory store; data is lost on exit");
        return Ok(Arc::new(MemoryStore::new()));
    }

    info!(url = %mask_password(&config.url), "Connecting to PostgreSQL");
    let pool = DatabasePool::connect(config).await?;
    if config.run_migrations {
        run_migrations(pool.pool()).await?;
    }
    Ok(Arc::new(PgStore::new(pool.into_pool())))
}

/// Build every collaborator from configuration, provision the primary
/// admin, and return the handler state.
pub async fn build_state(config: AppConfig) -> AppResult<AppState> {
    let store = connect_store(&config.database).await?;
    let objects = build_object_store(&config.storage).await?;
    let mailer = build_mailer(&config.email)?;

    ensure_primary_admin(&store, &config.admin).await?;

    AppState::new(config, store, objects, mailer)
}

/// Runs the server until Ctrl-C or SIGTERM.
pub async fn run_server(state: AppState) -> AppResult<()> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let environment = state.config.server.environment.clone();

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e))?;
    info!(address = %addr, environment = %environment, "ALWC server listening");

    let app = build_app(state).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Ctrl-C received, shutting down"),
        () = terminate => info!("SIGTERM received, shutting down"),
    }
}
