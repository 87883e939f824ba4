//! Integration tests for newsletter subscribers and sends.

use axum::http::{StatusCode, header};
use serde_json::json;

use alwc_entity::user::UserRole;

use crate::helpers::TestApp;

async fn subscribe(app: &TestApp, token: &str, email: &str) -> i64 {
    let response = app
        .request(
            "POST",
            "/api/newsletter/subscribers",
            Some(json!({ "email": email, "name": "Reader" })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_newsletter_requires_elevated_role() {
    let app = TestApp::new().await;
    app.create_test_user("editor@org.example", "EditorPass1", UserRole::User)
        .await;
    let token = app.login("editor@org.example", "EditorPass1").await;

    let response = app
        .request("GET", "/api/newsletter/subscribers", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.message(), "Forbidden: Admin access required");
}

#[tokio::test]
async fn test_subscribe_duplicate_and_reactivate() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;
    let id = subscribe(&app, &token, "reader@org.example").await;

    let duplicate = app
        .request(
            "POST",
            "/api/newsletter/subscribers",
            Some(json!({ "email": "reader@org.example" })),
            Some(&token),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.message(), "Email already subscribed");

    let unsubscribed = app
        .request(
            "PUT",
            &format!("/api/newsletter/subscribers/{id}"),
            Some(json!({ "status": "unsubscribed" })),
            Some(&token),
        )
        .await;
    assert_eq!(unsubscribed.status, StatusCode::OK);
    assert_eq!(unsubscribed.body["status"], "unsubscribed");
    assert!(!unsubscribed.body["unsubscribed_at"].is_null());

    let reactivated = app
        .request(
            "POST",
            "/api/newsletter/subscribers",
            Some(json!({ "email": "reader@org.example" })),
            Some(&token),
        )
        .await;
    assert_eq!(reactivated.status, StatusCode::OK);
    assert_eq!(reactivated.body["id"].as_i64(), Some(id));
    assert_eq!(reactivated.body["status"], "active");
    assert!(reactivated.body["unsubscribed_at"].is_null());
    assert_eq!(app.audit_actions().await[0].0, "resubscribe");

    let invalid = app
        .request(
            "POST",
            "/api/newsletter/subscribers",
            Some(json!({ "email": "not-an-email" })),
            Some(&token),
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_and_delete_subscribers() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;
    subscribe(&app, &token, "first@org.example").await;
    let second = subscribe(&app, &token, "second@org.example").await;

    let listed = app
        .request("GET", "/api/newsletter/subscribers", None, Some(&token))
        .await;
    let subscribers = listed.body.as_array().unwrap();
    assert_eq!(subscribers.len(), 2);
    assert_eq!(subscribers[0]["email"], "second@org.example");

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/newsletter/subscribers/{second}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let again = app
        .request(
            "DELETE",
            &format!("/api/newsletter/subscribers/{second}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.message(), "Subscriber not found");
}

#[tokio::test]
async fn test_send_newsletter_to_active_subscribers() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let empty = app
        .request(
            "POST",
            "/api/newsletter/send",
            Some(json!({ "subject": "News", "message": "Hello" })),
            Some(&token),
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.message(), "No subscribers found");

    subscribe(&app, &token, "active@org.example").await;
    let quiet = subscribe(&app, &token, "quiet@org.example").await;
    app.request(
        "PUT",
        &format!("/api/newsletter/subscribers/{quiet}"),
        Some(json!({ "status": "unsubscribed" })),
        Some(&token),
    )
    .await;

    let missing = app
        .request(
            "POST",
            "/api/newsletter/send",
            Some(json!({ "subject": "News" })),
            Some(&token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.message(), "Subject and message are required");

    let sent = app
        .request(
            "POST",
            "/api/newsletter/send",
            Some(json!({ "subject": "Spring <update>", "message": "See you at the <gala>" })),
            Some(&token),
        )
        .await;
    assert_eq!(sent.status, StatusCode::OK);
    assert_eq!(sent.body["recipientCount"], 1);
    assert_eq!(sent.message(), "Newsletter sent successfully");

    let email = app.mailer.last_to("active@org.example").expect("newsletter");
    assert!(email.html.contains("&lt;gala&gt;"));
    assert!(app.mailer.last_to("quiet@org.example").is_none());
    assert_eq!(
        app.audit_actions().await[0],
        ("send_newsletter".to_string(), "newsletter".to_string())
    );

    let everyone = app
        .request(
            "POST",
            "/api/newsletter/send",
            Some(json!({ "subject": "All", "message": "Hi", "recipients": "all" })),
            Some(&token),
        )
        .await;
    assert_eq!(everyone.body["recipientCount"], 2);
}

#[tokio::test]
async fn test_export_subscribers_csv() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;
    subscribe(&app, &token, "csv@org.example").await;

    let response = app
        .request(
            "GET",
            "/api/newsletter/subscribers/export",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[header::CONTENT_TYPE], "text/csv; charset=utf-8");
    assert_eq!(
        response.headers[header::CONTENT_DISPOSITION],
        "attachment; filename=newsletter-subscribers.csv"
    );
    let mut lines = response.text.lines();
    assert_eq!(
        lines.next(),
        Some("Email,Name,Status,Subscribed At,Unsubscribed At")
    );
    assert!(lines.next().unwrap().starts_with("\"csv@org.example\",\"Reader\",\"active\","));
}
