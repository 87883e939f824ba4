//! Collaborator traits defined in `alwc-core` and implemented by other crates.

pub mod mailer;
pub mod object_store;

pub use mailer::{Mailer, OutgoingEmail};
pub use object_store::ObjectStore;
