//! User administration and self-service profile updates.

pub mod admin;
pub mod profile;

pub use admin::{AdminUserService, CreateUserInput, UserSummary};
pub use profile::{ProfileService, ProfileUpdate};
