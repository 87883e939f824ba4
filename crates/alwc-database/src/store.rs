//! Transactional store abstraction.

use async_trait::async_trait;

use alwc_core::result::AppResult;

use crate::repositories::{
    AuditRepository, BoardMemberRepository, ContentRepository, EventImageRepository,
    EventRepository, ResetTokenRepository, SubscriberRepository, UserRepository,
};

/// Source of transactions.
#[async_trait]
pub trait Store: Send + Sync + std::fmt::Debug + 'static {
    /// Backend name for logs and health output ("postgres", "memory").
    fn backend(&self) -> &str;

    /// Open a transaction. A caller must not hold two at once.
    async fn begin(&self) -> AppResult<Box<dyn StoreTx>>;

    /// Check that the backend answers.
    async fn health_check(&self) -> AppResult<bool>;
}

/// One open transaction exposing every repository.
#[async_trait]
pub trait StoreTx:
    UserRepository
    + ResetTokenRepository
    + AuditRepository
    + ContentRepository
    + EventRepository
    + EventImageRepository
    + BoardMemberRepository
    + SubscriberRepository
    + Send
{
    /// Make every write in this transaction visible atomically.
    async fn commit(self: Box<Self>) -> AppResult<()>;
}
