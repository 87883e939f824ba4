//! Public contact form.

pub mod service;

pub use service::{ContactInput, ContactService};
