//! Integration tests for user administration, profiles, and the audit log.

use axum::http::StatusCode;
use serde_json::json;

use alwc_entity::user::UserRole;

use crate::helpers::{ADMIN_EMAIL, TestApp, token_from_email};

#[tokio::test]
async fn test_only_primary_admin_lists_users() {
    let app = TestApp::new().await;
    app.create_test_user("second@org.example", "SecondPass1", UserRole::Admin)
        .await;

    let token = app.login_admin().await;
    let response = app.request("GET", "/api/admin/users", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let users = response.body["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["email"], ADMIN_EMAIL);
    assert_eq!(users[0]["isMainAdmin"], true);
    assert_eq!(users[1]["isMainAdmin"], false);
    assert!(users[0].get("password_hash").is_none());

    let other = app.login("second@org.example", "SecondPass1").await;
    let forbidden = app.request("GET", "/api/admin/users", None, Some(&other)).await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_create_user_sends_welcome_link() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let response = app
        .request(
            "POST",
            "/api/admin/users",
            Some(json!({ "name": "New Editor", "email": "new@org.example" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["role"], "user");
    assert_eq!(response.body["name"], "New Editor");

    let welcome = app.mailer.last_to("new@org.example").expect("welcome email");
    let reset_token = token_from_email(&welcome);
    let redeemed = app
        .request(
            "POST",
            "/api/auth/reset-password",
            Some(json!({ "token": reset_token, "newPassword": "FirstPassword1" })),
            None,
        )
        .await;
    assert_eq!(redeemed.status, StatusCode::OK);
    app.login("new@org.example", "FirstPassword1").await;

    let duplicate = app
        .request(
            "POST",
            "/api/admin/users",
            Some(json!({ "name": "Again", "email": "NEW@org.example" })),
            Some(&token),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.message(), "Email already in use");
}

#[tokio::test]
async fn test_create_user_validation() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let missing = app
        .request(
            "POST",
            "/api/admin/users",
            Some(json!({ "name": "No Email" })),
            Some(&token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.message(), "Name and email are required");

    let bad_role = app
        .request(
            "POST",
            "/api/admin/users",
            Some(json!({ "name": "X", "email": "x@org.example", "role": "root" })),
            Some(&token),
        )
        .await;
    assert_eq!(bad_role.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_role.message(), "Invalid role");
}

#[tokio::test]
async fn test_primary_admin_role_is_fixed() {
    let app = TestApp::new().await;
    app.create_test_user("deputy@org.example", "DeputyPass1", UserRole::Admin)
        .await;
    let primary = app.find_user(ADMIN_EMAIL).await.unwrap();
    let token = app.login("deputy@org.example", "DeputyPass1").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/admin/users/{}/role", primary.id.0),
            Some(json!({ "role": "admin" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.message(), "Cannot change main admin's role");
    assert!(app.audit_actions().await.is_empty());
}

#[tokio::test]
async fn test_role_change_rules() {
    let app = TestApp::new().await;
    let editor = app
        .create_test_user("editor@org.example", "EditorPass1", UserRole::User)
        .await;
    let admin_token = app.login_admin().await;
    let editor_token = app.login("editor@org.example", "EditorPass1").await;
    let path = format!("/api/admin/users/{}/role", editor.id.0);

    let own = app
        .request("PUT", &path, Some(json!({ "role": "admin" })), Some(&editor_token))
        .await;
    assert_eq!(own.status, StatusCode::FORBIDDEN);

    // a plain user is refused before the role value is validated
    let bogus = app
        .request("PUT", &path, Some(json!({ "role": "root" })), Some(&editor_token))
        .await;
    assert_eq!(bogus.status, StatusCode::FORBIDDEN);
    assert_eq!(bogus.message(), "Forbidden: Admin access required");

    let missing = app
        .request("PUT", &path, Some(json!({})), Some(&admin_token))
        .await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.message(), "Role is required");

    let unknown = app
        .request(
            "PUT",
            "/api/admin/users/9999/role",
            Some(json!({ "role": "admin" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let promoted = app
        .request(
            "PUT",
            &path,
            Some(json!({ "role": "superuser" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(promoted.status, StatusCode::OK);
    assert_eq!(promoted.body["role"], "superuser");
    assert_eq!(
        app.audit_actions().await,
        vec![("update_role".to_string(), "user".to_string())]
    );
    let entry = &app.audit_entries().await[0];
    assert_eq!(entry.entity_id, Some(editor.id.0));
    assert_eq!(entry.previous_data, Some(json!({ "role": "user" })));
    assert_eq!(entry.new_data, Some(json!({ "role": "superuser" })));

    // The old token still says `user`; elevated routes read the stored role.
    let elevated = app
        .request("GET", "/api/newsletter/subscribers", None, Some(&editor_token))
        .await;
    assert_eq!(elevated.status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_user_rules() {
    let app = TestApp::new().await;
    let deputy = app
        .create_test_user("deputy@org.example", "DeputyPass1", UserRole::Admin)
        .await;
    let victim = app
        .create_test_user("victim@org.example", "VictimPass1", UserRole::User)
        .await;
    let primary = app.find_user(ADMIN_EMAIL).await.unwrap();
    let token = app.login("deputy@org.example", "DeputyPass1").await;

    let own = app
        .request(
            "DELETE",
            &format!("/api/admin/users/{}", deputy.id.0),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(own.status, StatusCode::FORBIDDEN);
    assert_eq!(own.message(), "You cannot delete your own user account");

    let main = app
        .request(
            "DELETE",
            &format!("/api/admin/users/{}", primary.id.0),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(main.status, StatusCode::FORBIDDEN);
    assert_eq!(main.message(), "Cannot delete the main admin account");

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/admin/users/{}", victim.id.0),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(app.find_user("victim@org.example").await.is_none());
    assert_eq!(
        app.audit_actions().await,
        vec![("delete".to_string(), "user".to_string())]
    );
    let entry = &app.audit_entries().await[0];
    assert_eq!(entry.entity_id, Some(victim.id.0));
    assert_eq!(
        entry.previous_data,
        Some(json!({
            "id": victim.id.0,
            "email": "victim@org.example",
            "name": "victim",
            "role": "user",
        }))
    );
    assert_eq!(entry.new_data, None);
}

#[tokio::test]
async fn test_request_superuser_emails_primary_admin() {
    let app = TestApp::new().await;
    app.create_test_user("helper@org.example", "HelperPass1", UserRole::User)
        .await;
    let token = app.login("helper@org.example", "HelperPass1").await;

    let response = app
        .request("POST", "/api/admin/request-superuser", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Superuser access request sent to admin");
    let email = app.mailer.last_to(ADMIN_EMAIL).expect("request email");
    assert!(email.text.contains("helper@org.example"));
    assert_eq!(app.audit_actions().await[0].0, "request_superuser");
}

#[tokio::test]
async fn test_update_own_profile_reissues_cookie() {
    let app = TestApp::new().await;
    let me = app
        .create_test_user("me@org.example", "MyPassword1", UserRole::User)
        .await;
    let token = app.login("me@org.example", "MyPassword1").await;

    let short = app
        .request(
            "PUT",
            "/api/admin/me",
            Some(json!({ "password": "short" })),
            Some(&token),
        )
        .await;
    assert_eq!(short.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "PUT",
            "/api/admin/me",
            Some(json!({ "name": "Renamed" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Renamed");

    let fresh = response.cookie("token").expect("re-issued cookie");
    let me_response = app.request("GET", "/api/auth/me", None, Some(&fresh)).await;
    assert_eq!(me_response.body["user"]["name"], "Renamed");
    assert_eq!(app.audit_actions().await[0].0, "update_profile");
    let entry = &app.audit_entries().await[0];
    let previous = entry.previous_data.as_ref().unwrap();
    let new = entry.new_data.as_ref().unwrap();
    assert_eq!(entry.entity_id, Some(me.id.0));
    assert_eq!(previous["name"], "me");
    assert_eq!(new["name"], "Renamed");
    assert_eq!(previous["email"], "me@org.example");
    assert_eq!(new["email"], "me@org.example");
}

#[tokio::test]
async fn test_audit_log_listing() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;
    for slug in ["home", "about", "donate"] {
        app.request(
            "PUT",
            &format!("/api/content/{slug}"),
            Some(json!({ "data": { "title": slug } })),
            Some(&token),
        )
        .await;
    }

    let all = app
        .request("GET", "/api/admin/audit-logs", None, Some(&token))
        .await;
    assert_eq!(all.status, StatusCode::OK);
    let logs = all.body["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 3);
    assert_eq!(logs[0]["entity_slug"], "donate");
    assert_eq!(logs[0]["user_email"], ADMIN_EMAIL);

    let page = app
        .request(
            "GET",
            "/api/admin/audit-logs?limit=1&offset=1",
            None,
            Some(&token),
        )
        .await;
    let logs = page.body["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["entity_slug"], "about");

    let anonymous = app.request("GET", "/api/admin/audit-logs", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_primary_admin_cannot_move_off_configured_email() {
    let app = TestApp::new().await;
    app.create_test_user("deputy@org.example", "DeputyPass1", UserRole::Admin)
        .await;
    let primary = app.find_user(ADMIN_EMAIL).await.unwrap();
    let admin_token = app.login_admin().await;

    let moved = app
        .request(
            "PUT",
            "/api/admin/me",
            Some(json!({ "email": "moved@org.example" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(moved.status, StatusCode::FORBIDDEN);
    assert_eq!(moved.message(), "Cannot change main admin's email");
    assert!(app.find_user(ADMIN_EMAIL).await.is_some());

    // the account stays protected
    let deputy_token = app.login("deputy@org.example", "DeputyPass1").await;
    let deleted = app
        .request(
            "DELETE",
            &format!("/api/admin/users/{}", primary.id.0),
            None,
            Some(&deputy_token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::FORBIDDEN);
    assert_eq!(deleted.message(), "Cannot delete the main admin account");
    assert!(app.audit_actions().await.is_empty());
}

#[tokio::test]
async fn test_configured_email_cannot_be_claimed() {
    let app = TestApp::with_config(|c| c.admin.password = None).await;
    assert!(app.find_user(ADMIN_EMAIL).await.is_none());
    let member = app
        .create_test_user("member@org.example", "MemberPass1", UserRole::User)
        .await;
    let token = app.login("member@org.example", "MemberPass1").await;

    let own = app
        .request(
            "PUT",
            "/api/admin/me",
            Some(json!({ "email": "Admin@Org.Example" })),
            Some(&token),
        )
        .await;
    assert_eq!(own.status, StatusCode::FORBIDDEN);
    assert_eq!(own.message(), "This email is reserved for the main admin");
    assert!(app.find_user(ADMIN_EMAIL).await.is_none());

    let listing = app.request("GET", "/api/admin/users", None, Some(&token)).await;
    assert_eq!(listing.status, StatusCode::FORBIDDEN);

    let created = app
        .request(
            "POST",
            "/api/admin/users",
            Some(json!({ "name": "Crony", "email": "crony@org.example", "role": "admin" })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::FORBIDDEN);
    assert!(app.find_user("crony@org.example").await.is_none());
    assert_eq!(app.find_user("member@org.example").await.unwrap().id, member.id);
}

#[tokio::test]
async fn test_primary_admin_routes_need_elevated_role() {
    let app = TestApp::with_config(|c| c.admin.password = None).await;
    app.create_test_user(ADMIN_EMAIL, "HolderPass1", UserRole::User)
        .await;
    let token = app.login(ADMIN_EMAIL, "HolderPass1").await;

    let listing = app.request("GET", "/api/admin/users", None, Some(&token)).await;
    assert_eq!(listing.status, StatusCode::FORBIDDEN);
    assert_eq!(listing.message(), "Forbidden: Admin access required");
}
