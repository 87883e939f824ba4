//! Shared application state passed to every handler via Axum's `State`.

use std::sync::Arc;

use chrono::Duration;

use alwc_auth::{PasswordValidator, RoleGuard, SessionManager};
use alwc_core::config::AppConfig;
use alwc_core::result::AppResult;
use alwc_core::traits::{Mailer, ObjectStore};
use alwc_database::Store;
use alwc_service::upload::UploadLimits;
use alwc_service::{
    AdminUserService, AuditService, BoardService, ContactService, ContentService, EventService,
    GalleryService, MailTemplates, NewsletterService, PasswordResetService, ProfileService,
};

use crate::middleware::RateLimits;

/// Application state shared across all request handlers.
///
/// Every field is an `Arc` so cloning per request is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ───────────────────────────────────────────
    pub config: Arc<AppConfig>,

    // ── Infrastructure ──────────────────────────────────────────
    pub store: Arc<dyn Store>,
    pub objects: Arc<dyn ObjectStore>,

    // ── Auth ────────────────────────────────────────────────────
    pub sessions: Arc<SessionManager>,
    pub guard: Arc<RoleGuard>,

    // ── Services ────────────────────────────────────────────────
    pub resets: Arc<PasswordResetService>,
    pub profiles: Arc<ProfileService>,
    pub admin_users: Arc<AdminUserService>,
    pub audit: Arc<AuditService>,
    pub content: Arc<ContentService>,
    pub events: Arc<EventService>,
    pub gallery: Arc<GalleryService>,
    pub board: Arc<BoardService>,
    pub newsletter: Arc<NewsletterService>,
    pub contact: Arc<ContactService>,

    // ── Throttling ──────────────────────────────────────────────
    pub rate_limits: Arc<RateLimits>,
}

impl AppState {
    /// Wire every service from configuration and the three outbound
    /// collaborators.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn Store>,
        objects: Arc<dyn ObjectStore>,
        mailer: Arc<dyn Mailer>,
    ) -> AppResult<Self> {
        let sessions = SessionManager::new(&config.auth, Arc::clone(&store))?;
        let guard = RoleGuard::new(config.admin.email.clone());
        let validator = PasswordValidator::new(&config.auth);
        let templates = MailTemplates::from_config(&config.email);
        let limits = UploadLimits::from_config(&config.storage);

        let resets = PasswordResetService::new(
            Arc::clone(&store),
            Arc::clone(&mailer),
            templates.clone(),
            validator.clone(),
            Duration::minutes(config.auth.reset_token_ttl_minutes),
        );
        let admin_users = AdminUserService::new(
            Arc::clone(&store),
            guard.clone(),
            validator.clone(),
            resets.clone(),
            Arc::clone(&mailer),
            templates.clone(),
        );
        let contact_recipient = config
            .email
            .contact_recipient
            .clone()
            .or_else(|| config.admin.email.clone());

        Ok(Self {
            profiles: Arc::new(ProfileService::new(
                Arc::clone(&store),
                guard.clone(),
                validator,
            )),
            audit: Arc::new(AuditService::new(Arc::clone(&store))),
            content: Arc::new(ContentService::new(Arc::clone(&store))),
            events: Arc::new(EventService::new(Arc::clone(&store), Arc::clone(&objects))),
            gallery: Arc::new(GalleryService::new(
                Arc::clone(&store),
                Arc::clone(&objects),
                limits,
            )),
            board: Arc::new(BoardService::new(
                Arc::clone(&store),
                Arc::clone(&objects),
                limits,
            )),
            newsletter: Arc::new(NewsletterService::new(
                Arc::clone(&store),
                Arc::clone(&mailer),
                templates.clone(),
            )),
            contact: Arc::new(ContactService::new(mailer, templates, contact_recipient)),
            rate_limits: Arc::new(RateLimits::from_config(&config.rate_limit)),
            sessions: Arc::new(sessions),
            guard: Arc::new(guard),
            resets: Arc::new(resets),
            admin_users: Arc::new(admin_users),
            config: Arc::new(config),
            store,
            objects,
        })
    }
}
