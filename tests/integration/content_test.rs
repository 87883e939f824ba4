//! Integration tests for site content documents and board members.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nnot-really-a-png";

#[tokio::test]
async fn test_missing_content_is_null() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/content/home", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "slug": "home", "data": null }));
}

#[tokio::test]
async fn test_put_content_upserts_and_audits() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let anonymous = app
        .request(
            "PUT",
            "/api/content/home",
            Some(json!({ "data": { "hero": "Hi" } })),
            None,
        )
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let not_object = app
        .request(
            "PUT",
            "/api/content/home",
            Some(json!({ "data": "plain string" })),
            Some(&token),
        )
        .await;
    assert_eq!(not_object.status, StatusCode::BAD_REQUEST);
    assert_eq!(not_object.message(), "Request body must include a data object");

    for hero in ["Hello", "Welcome"] {
        let response = app
            .request(
                "PUT",
                "/api/content/home",
                Some(json!({ "data": { "hero": hero } })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let read = app.request("GET", "/api/content/home", None, None).await;
    assert_eq!(read.body["slug"], "home");
    assert_eq!(read.body["data"]["hero"], "Welcome");

    assert_eq!(
        app.audit_actions().await,
        vec![
            ("update".to_string(), "site_content".to_string()),
            ("create".to_string(), "site_content".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_board_member_lifecycle() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let invalid = app
        .request(
            "POST",
            "/api/board-members",
            Some(json!({ "name": "Only Name" })),
            Some(&token),
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.message(), "Name and title are required");

    let chair = app
        .request(
            "POST",
            "/api/board-members",
            Some(json!({ "name": "Ada", "title": "Chair", "displayOrder": 1 })),
            Some(&token),
        )
        .await;
    assert_eq!(chair.status, StatusCode::CREATED);
    let chair_id = chair.body["id"].as_i64().unwrap();

    let treasurer = app
        .request(
            "POST",
            "/api/board-members",
            Some(json!({ "name": "Grace", "title": "Treasurer", "displayOrder": 0 })),
            Some(&token),
        )
        .await;
    let treasurer_id = treasurer.body["id"].as_i64().unwrap();

    let listed = app.request("GET", "/api/board-members", None, None).await;
    let members = listed.body["boardMembers"].as_array().unwrap();
    assert_eq!(members[0]["name"], "Grace");
    assert_eq!(members[1]["name"], "Ada");

    let reordered = app
        .request(
            "PUT",
            "/api/board-members/reorder",
            Some(json!({ "updates": [
                { "id": chair_id, "displayOrder": 0 },
                { "id": treasurer_id, "displayOrder": 1 },
            ] })),
            Some(&token),
        )
        .await;
    assert_eq!(reordered.status, StatusCode::OK);
    let listed = app.request("GET", "/api/board-members", None, None).await;
    assert_eq!(listed.body["boardMembers"][0]["name"], "Ada");

    let updated = app
        .request(
            "PUT",
            &format!("/api/board-members/{chair_id}"),
            Some(json!({ "title": "President" })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["title"], "President");
    assert_eq!(updated.body["name"], "Ada");

    let missing = app
        .request(
            "PUT",
            "/api/board-members/9999",
            Some(json!({ "title": "Nobody" })),
            Some(&token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.message(), "Board member not found");

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/board-members/{treasurer_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let actions: Vec<String> = app
        .audit_actions()
        .await
        .into_iter()
        .map(|(action, _)| action)
        .collect();
    assert_eq!(actions, ["delete", "update", "reorder", "create", "create"]);

    let entries = app.audit_entries().await;
    let removal = &entries[0];
    assert_eq!(removal.entity_id, Some(treasurer_id));
    assert_eq!(removal.previous_data.as_ref().unwrap()["name"], "Grace");
    assert_eq!(removal.new_data, None);

    let edit = &entries[1];
    let (before, after) = (
        edit.previous_data.as_ref().unwrap(),
        edit.new_data.as_ref().unwrap(),
    );
    assert_eq!(before["title"], "Chair");
    assert_eq!(before["display_order"], 0);
    assert_eq!(after["title"], "President");
    assert_eq!(after["name"], "Ada");

    let reorder = &entries[2];
    assert_eq!(reorder.previous_data, None);
    assert_eq!(
        reorder.new_data,
        Some(json!({ "updates": [
            { "id": chair_id, "displayOrder": 0 },
            { "id": treasurer_id, "displayOrder": 1 },
        ] }))
    );
}

#[tokio::test]
async fn test_board_portrait_upload() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let response = app
        .upload(
            "/api/board-member-image",
            "image",
            &[("ada.png", "image/png", PNG)],
            &token,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let url = response.body["imageUrl"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/board-member/"));
    assert!(url.ends_with(".png"));

    let served = app.request("GET", &url, None, None).await;
    assert_eq!(served.status, StatusCode::OK);
    assert_eq!(app.audit_actions().await[0].1, "board_member_image");

    let not_image = app
        .upload(
            "/api/board-member-image",
            "image",
            &[("notes.txt", "text/plain", b"hello")],
            &token,
        )
        .await;
    assert_eq!(not_image.status, StatusCode::BAD_REQUEST);
    assert_eq!(not_image.message(), "Only image files are allowed");
}
