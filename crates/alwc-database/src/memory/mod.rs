//! In-memory store for tests and database-less local runs.
//!
//! One Tokio mutex guards the whole state. A transaction holds the lock
//! for its lifetime and works on a copy; commit swaps the copy in, drop
//! discards it. Transactions are therefore fully serialized.

mod tables;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use alwc_core::result::AppResult;
use alwc_entity::board::BoardMember;
use alwc_entity::content::SiteContent;
use alwc_entity::event::{Event, EventImage};
use alwc_entity::newsletter::Subscriber;
use alwc_entity::reset::PasswordResetToken;
use alwc_entity::audit::AuditLogEntry;
use alwc_entity::user::User;

use crate::store::{Store, StoreTx};

/// Table contents plus per-table id sequences.
#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryState {
    sequences: HashMap<&'static str, i64>,
    pub(crate) users: BTreeMap<i64, User>,
    pub(crate) reset_tokens: BTreeMap<i64, PasswordResetToken>,
    pub(crate) audit: BTreeMap<i64, AuditLogEntry>,
    pub(crate) content: BTreeMap<String, SiteContent>,
    pub(crate) events: BTreeMap<i64, Event>,
    pub(crate) images: BTreeMap<i64, EventImage>,
    pub(crate) board: BTreeMap<i64, BoardMember>,
    pub(crate) subscribers: BTreeMap<i64, Subscriber>,
}

impl MemoryState {
    pub(crate) fn next_id(&mut self, table: &'static str) -> i64 {
        let seq = self.sequences.entry(table).or_insert(0);
        *seq += 1;
        *seq
    }
}

/// Store keeping every table in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &str {
        "memory"
    }

    async fn begin(&self) -> AppResult<Box<dyn StoreTx>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let work = guard.clone();
        Ok(Box::new(MemoryTx { guard, work }))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}

/// A serialized transaction over [`MemoryStore`].
#[derive(Debug)]
pub struct MemoryTx {
    guard: OwnedMutexGuard<MemoryState>,
    pub(crate) work: MemoryState,
}

#[async_trait]
impl StoreTx for MemoryTx {
    async fn commit(self: Box<Self>) -> AppResult<()> {
        let MemoryTx { mut guard, work } = *self;
        *guard = work;
        Ok(())
    }
}
