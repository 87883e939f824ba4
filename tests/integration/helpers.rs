//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use alwc_api::{AppState, build_app};
use alwc_auth::PasswordHasher;
use alwc_core::config::AppConfig;
use alwc_core::result::AppResult;
use alwc_core::traits::{Mailer, ObjectStore, OutgoingEmail};
use alwc_database::prelude::*;
use alwc_database::MemoryStore;
use alwc_entity::audit::AuditLogEntry;
use alwc_entity::user::{NewUser, User, UserRole};
use alwc_service::ensure_primary_admin;
use alwc_storage::providers::LocalObjectStore;

pub const ADMIN_EMAIL: &str = "admin@org.example";
pub const ADMIN_PASSWORD: &str = "CorrectPass1";

/// Captures outgoing email instead of delivering it.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// The last message addressed to `to`.
    pub fn last_to(&self, to: &str) -> Option<OutgoingEmail> {
        self.sent().into_iter().rev().find(|m| m.to == to)
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    fn provider_type(&self) -> &str {
        "recording"
    }

    async fn send(&self, email: OutgoingEmail) -> AppResult<()> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store for direct reads and seeding
    pub store: Arc<dyn Store>,
    pub mailer: Arc<RecordingMailer>,
    pub config: AppConfig,
    /// Keeps the upload directory alive for the test's duration.
    pub uploads: TempDir,
}

impl TestApp {
    /// Create a new test application with rate limiting off.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test application after adjusting the base configuration.
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let uploads = tempfile::tempdir().expect("Failed to create upload dir");

        let mut config = AppConfig::default();
        config.database.url = "memory://".to_string();
        config.auth.jwt_secret = Some("integration-test-secret".to_string());
        config.admin.email = Some(ADMIN_EMAIL.to_string());
        config.admin.password = Some(ADMIN_PASSWORD.to_string());
        config.rate_limit.enabled = false;
        config.email.frontend_url = "https://site.example".to_string();
        config.storage.local.root_path = uploads.path().display().to_string();
        adjust(&mut config);

        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        ensure_primary_admin(&store, &config.admin)
            .await
            .expect("Failed to provision primary admin");

        let objects: Arc<dyn ObjectStore> = Arc::new(
            LocalObjectStore::new(
                &config.storage.local.root_path,
                &config.storage.local.public_base_url,
            )
            .await
            .expect("Failed to init storage"),
        );
        let mailer = Arc::new(RecordingMailer::default());

        let state = AppState::new(
            config.clone(),
            Arc::clone(&store),
            objects,
            Arc::clone(&mailer) as Arc<dyn Mailer>,
        )
        .expect("Failed to build state");

        Self {
            router: build_app(state),
            store,
            mailer,
            config,
            uploads,
        }
    }

    /// Insert a user with a known password
    pub async fn create_test_user(&self, email: &str, password: &str, role: UserRole) -> User {
        let hash = PasswordHasher::new()
            .hash_password(password)
            .expect("Failed to hash password");
        let mut tx = self.store.begin().await.unwrap();
        let user = tx
            .insert_user(NewUser {
                email: email.to_string(),
                name: email.split('@').next().unwrap().to_string(),
                password_hash: hash,
                role,
            })
            .await
            .expect("Failed to create test user");
        tx.commit().await.unwrap();
        user
    }

    pub async fn find_user(&self, email: &str) -> Option<User> {
        let mut tx = self.store.begin().await.unwrap();
        tx.find_user_by_email(email).await.unwrap()
    }

    /// Login and return the session token from the cookie
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );
        response
            .cookie(&self.config.auth.cookie_name)
            .expect("No session cookie in login response")
    }

    pub async fn login_admin(&self) -> String {
        self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        self.send(req.body(Body::from(body_str)).expect("Failed to build request"))
            .await
    }

    /// Upload `(file_name, content_type, bytes)` parts under `field`.
    pub async fn upload(
        &self,
        path: &str,
        field: &str,
        files: &[(&str, &str, &[u8])],
        token: &str,
    ) -> TestResponse {
        const BOUNDARY: &str = "alwc-test-boundary";
        let mut body = Vec::new();
        for (name, content_type, data) in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; \
                     filename=\"{name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(req).await
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let text = String::from_utf8_lossy(&bytes).to_string();
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            text,
        }
    }

    /// Audit actions, newest first.
    pub async fn audit_actions(&self) -> Vec<(String, String)> {
        let mut tx = self.store.begin().await.unwrap();
        tx.list_audit(200, 0)
            .await
            .unwrap()
            .into_iter()
            .map(|e| (e.action, e.entity_type))
            .collect()
    }

    /// Full audit entries, newest first.
    pub async fn audit_entries(&self) -> Vec<AuditLogEntry> {
        let mut tx = self.store.begin().await.unwrap();
        tx.list_audit(200, 0).await.unwrap()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body, `Null` when the body is not JSON
    pub body: Value,
    /// Raw body text
    pub text: String,
}

impl TestResponse {
    /// Value of a cookie set by this response.
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.set_cookie(name).and_then(|raw| {
            raw.split(';')
                .next()
                .and_then(|pair| pair.split_once('='))
                .map(|(_, value)| value.to_string())
        })
    }

    /// Full `Set-Cookie` header for `name`.
    pub fn set_cookie(&self, name: &str) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with(&format!("{name}=")))
            .map(str::to_string)
    }

    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

/// Pull the 64-character reset token out of an email body.
pub fn token_from_email(email: &OutgoingEmail) -> String {
    let start = email.text.find("token=").expect("No reset link in email") + "token=".len();
    email.text[start..start + 64].to_string()
}
