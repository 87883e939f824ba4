//! Editable page content.

pub mod service;

pub use service::ContentService;
