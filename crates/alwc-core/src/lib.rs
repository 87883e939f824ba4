//! # alwc-core
//!
//! Core crate for the ALWC site backend. Contains the unified error system,
//! configuration schemas, typed identifiers, list/response types, and the
//! outbound-collaborator traits (object storage, mail).
//!
//! This crate has **no** internal dependencies on other ALWC crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
