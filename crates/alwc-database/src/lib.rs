//! # alwc-database
//!
//! PostgreSQL connection management, migrations, and the transactional
//! [`Store`] abstraction every service works through. Two backends
//! implement it: [`PgStore`] for production and [`MemoryStore`] for tests
//! and database-less local runs.
//!
//! All reads and writes happen on a [`StoreTx`]; nothing is visible to other
//! transactions until [`StoreTx::commit`] returns, and dropping a
//! transaction without committing rolls it back.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{Store, StoreTx};

/// Import this to call repository methods on a `Box<dyn StoreTx>`.
pub mod prelude {
    pub use crate::repositories::{
        AuditRepository, BoardMemberRepository, ContentRepository, EventImageRepository,
        EventRepository, ResetTokenRepository, SubscriberRepository, UserRepository,
    };
    pub use crate::store::{Store, StoreTx};
}
