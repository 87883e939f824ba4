//! PostgreSQL-backed store.
//!
//! A [`PgTx`] wraps one `sqlx` transaction; every repository method runs
//! its statements on that connection.

mod audit;
mod board;
mod content;
mod event;
mod reset;
mod subscriber;
mod user;

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use alwc_core::error::{AppError, ErrorKind};
use alwc_core::result::AppResult;

use crate::store::{Store, StoreTx};

/// Store over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &str {
        "postgres"
    }

    async fn begin(&self) -> AppResult<Box<dyn StoreTx>> {
        let tx = self.pool.begin().await.map_err(db_error("Failed to begin transaction"))?;
        Ok(Box::new(PgTx { tx }))
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}

/// An open PostgreSQL transaction. Dropped uncommitted, it rolls back.
pub struct PgTx {
    pub(crate) tx: Transaction<'static, Postgres>,
}

impl std::fmt::Debug for PgTx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgTx").finish_non_exhaustive()
    }
}

#[async_trait]
impl StoreTx for PgTx {
    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await.map_err(db_error("Failed to commit transaction"))?;
        debug!("Transaction committed");
        Ok(())
    }
}

/// Wrap a sqlx error as a database failure with context.
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}

/// Like [`db_error`], but a unique-constraint violation becomes a
/// `Conflict` carrying `conflict_message`.
pub(crate) fn unique_or_db_error(
    context: &'static str,
    conflict_message: &'static str,
) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        let unique = e
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation());
        if unique {
            AppError::conflict(conflict_message)
        } else {
            AppError::with_source(ErrorKind::Database, context, e)
        }
    }
}
