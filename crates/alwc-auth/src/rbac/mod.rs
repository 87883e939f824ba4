//! Role checks: elevated access and the primary administrator.

pub mod guard;

pub use guard::RoleGuard;
