//! Integration tests for login, sessions, and password reset.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;

use alwc_entity::user::UserRole;
use alwc_service::auth::reset::FORGOT_PASSWORD_MESSAGE;

use crate::helpers::{ADMIN_EMAIL, ADMIN_PASSWORD, TestApp, token_from_email};

#[tokio::test]
async fn test_login_success_sets_cookie() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let user = &response.body["user"];
    assert_eq!(user["email"], ADMIN_EMAIL);
    assert_eq!(user["role"], "admin");
    assert_eq!(user["isAdmin"], true);
    assert_eq!(user["isMainAdmin"], true);

    let cookie = response.set_cookie("token").expect("session cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains(&format!("Max-Age={}", 7 * 24 * 3600)));
    assert!(!cookie.contains("Secure"));
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new().await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": ADMIN_EMAIL, "password": "WrongPass1" })),
            None,
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "nobody@org.example", "password": ADMIN_PASSWORD })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(wrong_password.message(), "Invalid credentials");
    assert!(wrong_password.set_cookie("token").is_none());
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": ADMIN_EMAIL })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Email and password are required");
}

#[tokio::test]
async fn test_me_with_bearer_and_cookie() {
    let app = TestApp::new().await;
    app.create_test_user("editor@org.example", "EditorPass1", UserRole::User)
        .await;
    let token = app.login("editor@org.example", "EditorPass1").await;

    let by_bearer = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(by_bearer.status, StatusCode::OK);
    assert_eq!(by_bearer.body["user"]["email"], "editor@org.example");
    assert_eq!(by_bearer.body["user"]["isAdmin"], false);
    assert_eq!(by_bearer.body["user"]["isMainAdmin"], false);

    let req = Request::builder()
        .method("GET")
        .uri("/api/auth/me")
        .header(header::COOKIE, format!("token={token}"))
        .body(Body::empty())
        .unwrap();
    let by_cookie = app.send(req).await;
    assert_eq!(by_cookie.status, StatusCode::OK);
    assert_eq!(by_cookie.body["user"]["role"], "user");
}

#[tokio::test]
async fn test_me_rejects_missing_and_bad_tokens() {
    let app = TestApp::new().await;

    let missing = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["error"], "UNAUTHENTICATED");
    assert_eq!(missing.message(), "Authentication required");

    let garbage = app
        .request("GET", "/api/auth/me", None, Some("not-a-jwt"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_secret_is_server_error() {
    let app = TestApp::with_config(|c| c.auth.jwt_secret = None).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "SERVER_MISCONFIGURED");
    assert_eq!(response.message(), "Server configuration error");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new().await;

    let response = app.request("POST", "/api/auth/logout", None, None).await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    let cookie = response.set_cookie("token").expect("removal cookie");
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_deleted_user_fails_elevated_checks() {
    let app = TestApp::new().await;
    let user = app
        .create_test_user("gone@org.example", "GonePass12", UserRole::Admin)
        .await;
    let token = app.login("gone@org.example", "GonePass12").await;

    {
        use alwc_database::prelude::*;
        let mut tx = app.store.begin().await.unwrap();
        tx.delete_user(user.id).await.unwrap();
        tx.commit().await.unwrap();
    }

    // claim-only routes still accept the token
    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);

    let elevated = app
        .request("GET", "/api/newsletter/subscribers", None, Some(&token))
        .await;
    assert_eq!(elevated.status, StatusCode::UNAUTHORIZED);
    assert_eq!(elevated.message(), "User no longer exists");
}

#[tokio::test]
async fn test_forgot_password_same_answer_for_unknown_email() {
    let app = TestApp::new().await;
    app.create_test_user("known@org.example", "KnownPass1", UserRole::User)
        .await;

    let known = app
        .request(
            "POST",
            "/api/auth/forgot-password",
            Some(json!({ "email": "known@org.example" })),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/api/auth/forgot-password",
            Some(json!({ "email": "stranger@org.example" })),
            None,
        )
        .await;

    assert_eq!(known.status, StatusCode::OK);
    assert_eq!(unknown.status, StatusCode::OK);
    assert_eq!(known.body, unknown.body);
    assert_eq!(known.message(), FORGOT_PASSWORD_MESSAGE);

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "known@org.example");
    assert!(sent[0].text.contains("https://site.example/reset-password?token="));
}

#[tokio::test]
async fn test_reset_password_flow() {
    let app = TestApp::new().await;
    app.create_test_user("reset@org.example", "OldPassword1", UserRole::User)
        .await;
    app.request(
        "POST",
        "/api/auth/forgot-password",
        Some(json!({ "email": "reset@org.example" })),
        None,
    )
    .await;
    let token = token_from_email(&app.mailer.last_to("reset@org.example").unwrap());

    // A weak password is rejected without touching the token.
    let weak = app
        .request(
            "POST",
            "/api/auth/reset-password",
            Some(json!({ "token": token, "newPassword": "short" })),
            None,
        )
        .await;
    assert_eq!(weak.status, StatusCode::BAD_REQUEST);
    assert_eq!(weak.message(), "Password must be at least 8 characters long");

    let first = app
        .request(
            "POST",
            "/api/auth/reset-password",
            Some(json!({ "token": token, "newPassword": "NewPassword1" })),
            None,
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.message(), "Password has been reset successfully");

    let second = app
        .request(
            "POST",
            "/api/auth/reset-password",
            Some(json!({ "token": token, "newPassword": "OtherPassword1" })),
            None,
        )
        .await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert!(second.message().contains("already been used"));

    app.login("reset@org.example", "NewPassword1").await;
    let (action, entity) = app.audit_actions().await.remove(0);
    assert_eq!(action, "reset_password");
    assert_eq!(entity, "user");
}

#[tokio::test]
async fn test_reset_password_unknown_token() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/reset-password",
            Some(json!({ "token": "abc", "newPassword": "LongEnough1" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Invalid or expired reset token");
}

#[tokio::test]
async fn test_reset_password_requires_both_fields() {
    let app = TestApp::new().await;

    for body in [
        json!({ "newPassword": "LongEnough1" }),
        json!({ "token": "abc" }),
        json!({ "token": "", "newPassword": "" }),
    ] {
        let response = app
            .request("POST", "/api/auth/reset-password", Some(body), None)
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.message(), "Token and new password are required");
    }
}
