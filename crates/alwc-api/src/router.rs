//! Route definitions for the ALWC HTTP API.
//!
//! All routes are organized by area and mounted under `/api`. Uploaded
//! images and the built frontend are served from disk when configured.

use std::path::Path;
use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use alwc_core::config::AppConfig;
use alwc_core::error::AppError;

use crate::error::ApiError;
use crate::handlers;
use crate::middleware::{self, build_cors_layer, rate_limit};
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    let api_routes = Router::new()
        .merge(auth_routes(&state))
        .merge(admin_routes())
        .merge(content_routes())
        .merge(event_routes())
        .merge(image_routes())
        .merge(board_routes())
        .merge(newsletter_routes())
        .merge(contact_routes(&state))
        .merge(health_routes())
        .fallback(api_not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            rate_limit::api_limit,
        ));

    let router = mount_static(Router::new().nest("/api", api_routes), &config);

    let router = router
        .layer(DefaultBodyLimit::max(config.server.body_limit_bytes))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server.request_timeout_seconds),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&config.server.cors))
        .layer(axum_middleware::from_fn(middleware::request_logging));

    let router = if config.server.is_production() {
        router.layer(axum_middleware::from_fn(middleware::security_headers))
    } else {
        router
    };

    router.with_state(state)
}

/// Local uploads under their public prefix, then the SPA with an
/// `index.html` fallback for client-side routes.
fn mount_static(router: Router<AppState>, config: &AppConfig) -> Router<AppState> {
    let local = &config.storage.local;
    let router = if config.storage.provider == "local"
        && local.public_base_url.starts_with('/')
        && local.public_base_url.len() > 1
    {
        router.nest_service(
            local.public_base_url.trim_end_matches('/'),
            ServeDir::new(&local.root_path),
        )
    } else {
        router
    };

    match &config.server.static_dir {
        Some(dir) => {
            let index = Path::new(dir).join("index.html");
            router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)))
        }
        None => router,
    }
}

async fn api_not_found() -> ApiError {
    AppError::not_found("Route not found").into()
}

/// Auth endpoints: login, logout, me, password reset
fn auth_routes(state: &AppState) -> Router<AppState> {
    let login = Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            rate_limit::login_limit,
        ));

    let reset = Router::new()
        .route("/auth/forgot-password", post(handlers::auth::forgot_password))
        .route("/auth/reset-password", post(handlers::auth::reset_password))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            rate_limit::password_reset_limit,
        ));

    Router::new()
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        .merge(login)
        .merge(reset)
}

/// User management, own profile, elevation requests, audit log
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/users",
            get(handlers::admin::users::list_users).post(handlers::admin::users::create_user),
        )
        .route(
            "/admin/users/{id}",
            put(handlers::admin::users::update_user).delete(handlers::admin::users::delete_user),
        )
        .route(
            "/admin/users/{id}/role",
            put(handlers::admin::users::change_role),
        )
        .route("/admin/me", put(handlers::admin::profile::update_me))
        .route(
            "/admin/request-superuser",
            post(handlers::admin::users::request_superuser),
        )
        .route(
            "/admin/audit-logs",
            get(handlers::admin::audit::list_audit_logs),
        )
        .route("/admin/events", get(handlers::events::list_all))
}

fn content_routes() -> Router<AppState> {
    Router::new().route(
        "/content/{slug}",
        get(handlers::content::get_content).put(handlers::content::put_content),
    )
}

fn event_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events",
            get(handlers::events::list_published).post(handlers::events::create_event),
        )
        .route("/events/reorder", put(handlers::events::reorder_events))
        .route(
            "/events/{id}",
            put(handlers::events::update_event).delete(handlers::events::delete_event),
        )
}

/// Event galleries and board portraits
fn image_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/events/{id}/images",
            get(handlers::images::list_event_images).post(handlers::images::upload_event_images),
        )
        .route(
            "/events/{id}/images/reorder",
            put(handlers::images::reorder_event_images),
        )
        .route(
            "/events/{id}/images/{image_id}",
            delete(handlers::images::delete_event_image),
        )
        .route(
            "/board-member-image",
            post(handlers::images::upload_board_member_image),
        )
}

fn board_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/board-members",
            get(handlers::board::list_members).post(handlers::board::create_member),
        )
        .route("/board-members/reorder", put(handlers::board::reorder_members))
        .route(
            "/board-members/{id}",
            put(handlers::board::update_member).delete(handlers::board::delete_member),
        )
}

fn newsletter_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/newsletter/subscribers",
            get(handlers::newsletter::list_subscribers).post(handlers::newsletter::add_subscriber),
        )
        .route(
            "/newsletter/subscribers/export",
            get(handlers::newsletter::export_subscribers),
        )
        .route(
            "/newsletter/subscribers/{id}",
            put(handlers::newsletter::update_subscriber)
                .delete(handlers::newsletter::delete_subscriber),
        )
        .route("/newsletter/send", post(handlers::newsletter::send_newsletter))
}

/// The contact form, also reachable at its older path under `/auth`.
fn contact_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/contact", post(handlers::contact::submit))
        .route("/auth/contact", post(handlers::contact::submit))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            rate_limit::contact_limit,
        ))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
