//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod upload;

pub use auth::{AuthUser, CurrentUser, ElevatedUser, PrimaryAdmin};
pub use json::{ApiJson, ApiPath};
pub use upload::collect_files;
