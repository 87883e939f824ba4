//! # alwc-entity
//!
//! Domain entity models for the ALWC site backend. Every struct in this
//! crate represents a database table row or a domain value object. Row
//! types derive `sqlx::FromRow` and serialize with the column names the
//! frontend reads.

pub mod audit;
pub mod board;
pub mod content;
pub mod event;
pub mod newsletter;
pub mod reset;
pub mod user;
