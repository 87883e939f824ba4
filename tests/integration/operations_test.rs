//! Integration tests for health, the contact form, and cross-cutting middleware.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;

use alwc_core::config::rate_limit::BucketConfig;

use crate::helpers::{ADMIN_EMAIL, TestApp};

#[tokio::test]
async fn test_health_reports_components() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "connected");
    assert_eq!(response.body["storage"], "available");
    assert!(response.body["version"].is_string());
}

#[tokio::test]
async fn test_unknown_api_route_is_json_404() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/does-not-exist", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
    assert_eq!(response.message(), "Route not found");
}

#[tokio::test]
async fn test_contact_form_forwards_to_admin() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/contact",
            Some(json!({
                "name": "Visitor",
                "email": "visitor@mail.example",
                "message": "Can I <volunteer>?"
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Message sent successfully");
    let email = app.mailer.last_to(ADMIN_EMAIL).expect("forwarded message");
    assert_eq!(email.reply_to.as_deref(), Some("visitor@mail.example"));
    assert!(email.html.contains("&lt;volunteer&gt;"));
}

#[tokio::test]
async fn test_contact_form_validation() {
    let app = TestApp::new().await;

    let missing = app
        .request(
            "POST",
            "/api/contact",
            Some(json!({ "name": "Visitor", "message": "Hello" })),
            None,
        )
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.message(), "Name, email, and message are required");

    let invalid = app
        .request(
            "POST",
            "/api/auth/contact",
            Some(json!({ "name": "Visitor", "email": "nope", "message": "Hello" })),
            None,
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.message(), "Invalid email address");
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_contact_alias_under_auth() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/contact",
            Some(json!({ "name": "A", "email": "a@mail.example", "message": "Hi" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.mailer.sent().len(), 1);
}

#[tokio::test]
async fn test_failed_logins_are_rate_limited() {
    let app = TestApp::with_config(|c| {
        c.rate_limit.enabled = true;
        c.rate_limit.login = BucketConfig {
            max_requests: 2,
            window_seconds: 900,
        };
    })
    .await;
    let attempt = json!({ "email": ADMIN_EMAIL, "password": "WrongPass1" });

    for _ in 0..2 {
        let response = app
            .request("POST", "/api/auth/login", Some(attempt.clone()), None)
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    let blocked = app
        .request("POST", "/api/auth/login", Some(attempt), None)
        .await;
    assert_eq!(blocked.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(blocked.body["error"], "RATE_LIMITED");
    assert_eq!(
        blocked.message(),
        "Too many login attempts, please try again later."
    );

    // Other clients keep their own bucket.
    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", "203.0.113.9")
        .body(Body::from(
            json!({ "email": ADMIN_EMAIL, "password": "WrongPass1" }).to_string(),
        ))
        .unwrap();
    let elsewhere = app.send(req).await;
    assert_eq!(elsewhere.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_successful_logins_do_not_consume_budget() {
    let app = TestApp::with_config(|c| {
        c.rate_limit.enabled = true;
        c.rate_limit.login = BucketConfig {
            max_requests: 1,
            window_seconds: 900,
        };
    })
    .await;

    for _ in 0..3 {
        app.login_admin().await;
    }
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = TestApp::new().await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/health")
        .header("x-request-id", "trace-abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app.send(req).await;
    assert_eq!(response.headers["x-request-id"], "trace-abc-123");

    let generated = app.request("GET", "/api/health", None, None).await;
    assert!(!generated.headers["x-request-id"].is_empty());
}

#[tokio::test]
async fn test_security_headers_only_in_production() {
    let dev = TestApp::new().await;
    let response = dev.request("GET", "/api/health", None, None).await;
    assert!(response.headers.get(header::X_CONTENT_TYPE_OPTIONS).is_none());

    let prod = TestApp::with_config(|c| c.server.environment = "production".to_string()).await;
    let response = prod.request("GET", "/api/health", None, None).await;
    assert_eq!(response.headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(response.headers[header::X_FRAME_OPTIONS], "SAMEORIGIN");
}
