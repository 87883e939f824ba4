//! Audit log reads.

pub mod service;

pub use service::AuditService;
