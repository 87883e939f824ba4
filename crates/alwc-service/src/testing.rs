//! Shared fixtures for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use alwc_core::error::AppError;
use alwc_core::result::AppResult;
use alwc_core::traits::{Mailer, OutgoingEmail};
use alwc_core::types::UserId;
use alwc_database::prelude::*;
use alwc_entity::user::{NewUser, User, UserRole};

use crate::context::RequestContext;

/// Keeps every message instead of sending it. Fails on demand.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
    pub fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    fn provider_type(&self) -> &str {
        "recording"
    }

    async fn send(&self, email: OutgoingEmail) -> AppResult<()> {
        if self.fail {
            return Err(AppError::external("mail provider down"));
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

pub fn ctx_for(user: &User) -> RequestContext {
    RequestContext::from_user(user)
}

pub fn anonymous_ctx(id: i64) -> RequestContext {
    RequestContext {
        user_id: UserId(id),
        email: "someone@example.org".to_string(),
        name: "Someone".to_string(),
        role: UserRole::User,
        request_time: Utc::now(),
    }
}

/// Insert a user with a real password hash of `password`.
pub async fn seed_user(
    store: &Arc<dyn Store>,
    email: &str,
    role: UserRole,
    password: &str,
) -> User {
    let hash = alwc_auth::PasswordHasher::new()
        .hash_password(password)
        .unwrap();
    let mut tx = store.begin().await.unwrap();
    let user = tx
        .insert_user(NewUser {
            email: email.to_string(),
            name: email.split('@').next().unwrap_or("user").to_string(),
            password_hash: hash,
            role,
        })
        .await
        .unwrap();
    tx.commit().await.unwrap();
    user
}

pub async fn audit_actions(store: &Arc<dyn Store>) -> Vec<String> {
    let mut tx = store.begin().await.unwrap();
    tx.list_audit(200, 0)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.action)
        .collect()
}
