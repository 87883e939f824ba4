//! User domain entities.

pub mod model;
pub mod role;

pub use model::{NewUser, User, UserChanges};
pub use role::UserRole;
