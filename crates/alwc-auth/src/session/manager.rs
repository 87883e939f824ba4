//! Session manager: login, token issuance, and token resolution.
//!
//! Sessions are stateless. A token is valid from issuance until its fixed
//! expiry and carries everything needed to identify the caller.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use alwc_core::config::auth::AuthConfig;
use alwc_core::error::AppError;
use alwc_database::prelude::*;
use alwc_entity::user::User;

use crate::jwt::{Claims, JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;

/// Result of a successful login or re-issue.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Signed token for the cookie or `Authorization` header.
    pub token: String,
    pub claims: Claims,
    pub user: User,
}

/// Authenticates credentials and issues or resolves session tokens.
#[derive(Clone)]
pub struct SessionManager {
    /// `None` while no signing secret is configured.
    keys: Option<Arc<(JwtEncoder, JwtDecoder)>>,
    store: Arc<dyn Store>,
    hasher: PasswordHasher,
    /// Verified against when the email is unknown, so both failure paths
    /// cost one Argon2 verification.
    dummy_hash: Arc<str>,
    ttl: Duration,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("configured", &self.keys.is_some())
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionManager {
    pub fn new(config: &AuthConfig, store: Arc<dyn Store>) -> Result<Self, AppError> {
        let keys = config
            .jwt_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|secret| Arc::new((JwtEncoder::new(secret), JwtDecoder::new(secret))));
        if keys.is_none() {
            warn!("auth.jwt_secret is not set; login and protected routes will fail");
        }

        let hasher = PasswordHasher::new();
        let dummy_hash = hasher.unusable_hash()?;

        Ok(Self {
            keys,
            store,
            hasher,
            dummy_hash: dummy_hash.into(),
            ttl: Duration::days(config.session_ttl_days),
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn keys(&self) -> Result<&(JwtEncoder, JwtDecoder), AppError> {
        self.keys
            .as_deref()
            .ok_or_else(|| AppError::misconfigured("JWT secret is not configured"))
    }

    /// Check an email/password pair and issue a session.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<IssuedSession, AppError> {
        self.keys()?;

        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }

        let user = {
            let mut tx = self.store.begin().await?;
            tx.find_user_by_email(email).await?
        };

        let Some(user) = user else {
            // Burn the same work as a real check.
            let _ = self.hasher.verify_password(password, &self.dummy_hash);
            debug!(email = %email, "Login attempt for unknown email");
            return Err(AppError::invalid_credentials());
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            info!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::invalid_credentials());
        }

        let session = self.issue(user)?;
        info!(
            user_id = %session.user.id,
            role = %session.user.role,
            "User logged in"
        );
        Ok(session)
    }

    /// Sign a fresh token for `user`.
    pub fn issue(&self, user: User) -> Result<IssuedSession, AppError> {
        let (encoder, _) = self.keys()?;
        let claims = Claims::for_user(&user, Utc::now(), self.ttl);
        let token = encoder.encode(&claims)?;
        Ok(IssuedSession {
            token,
            claims,
            user,
        })
    }

    /// Verify a token and return its claims. No database access.
    pub fn resolve(&self, token: &str) -> Result<Claims, AppError> {
        let (_, decoder) = self.keys()?;
        decoder.decode(token)
    }

    /// Load the current row for a session's user. A user deleted after the
    /// token was issued is treated as signed out.
    pub async fn current_user(&self, claims: &Claims) -> Result<User, AppError> {
        let mut tx = self.store.begin().await?;
        tx.find_user(claims.user_id())
            .await?
            .ok_or_else(|| AppError::unauthenticated("User no longer exists"))
    }
}
