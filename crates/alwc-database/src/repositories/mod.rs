//! Repository traits implemented by every store transaction.
//!
//! Each trait covers one table family. Methods run inside the transaction
//! that implements them.

pub mod audit;
pub mod board;
pub mod content;
pub mod event;
pub mod image;
pub mod reset;
pub mod subscriber;
pub mod user;

pub use audit::AuditRepository;
pub use board::BoardMemberRepository;
pub use content::ContentRepository;
pub use event::EventRepository;
pub use image::EventImageRepository;
pub use reset::ResetTokenRepository;
pub use subscriber::SubscriberRepository;
pub use user::UserRepository;

/// Message for a duplicate account email.
pub const EMAIL_IN_USE: &str = "Email already in use";
