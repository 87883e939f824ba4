//! # alwc-service
//!
//! Business logic service layer for the ALWC site backend. Each service
//! runs its use case inside one store transaction: the business write and
//! its audit entry commit together or not at all. Email goes out after
//! commit.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod audit;
pub mod auth;
pub mod board;
pub mod bootstrap;
pub mod contact;
pub mod content;
pub mod context;
pub mod event;
pub mod mail;
pub mod newsletter;
pub mod patch;
pub mod upload;
pub mod user;
pub mod validation;

pub use audit::AuditService;
pub use auth::PasswordResetService;
pub use board::BoardService;
pub use bootstrap::ensure_primary_admin;
pub use contact::ContactService;
pub use content::ContentService;
pub use context::RequestContext;
pub use event::{EventService, GalleryService};
pub use mail::MailTemplates;
pub use newsletter::NewsletterService;
pub use upload::UploadedFile;
pub use user::{AdminUserService, ProfileService};

#[cfg(test)]
pub(crate) mod testing;
