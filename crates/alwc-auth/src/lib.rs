//! # alwc-auth
//!
//! Authentication and authorization for the ALWC site backend.
//!
//! ## Modules
//!
//! - `jwt`: session token claims, signing, and verification
//! - `password`: Argon2id password hashing and length policy
//! - `rbac`: the role guard: elevated and primary-admin checks
//! - `reset`: password reset token generation and redemption checks
//! - `session`: credential authentication and token issuance

pub mod jwt;
pub mod password;
pub mod rbac;
pub mod reset;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use rbac::RoleGuard;
pub use reset::{ResetTokenError, generate_reset_token, hash_reset_token};
pub use session::{IssuedSession, SessionManager};
