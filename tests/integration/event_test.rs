//! Integration tests for events and their image galleries.

use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::TestApp;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake";
const JPEG: &[u8] = b"\xff\xd8\xff\xe0fake";

async fn create_event(app: &TestApp, token: &str, body: Value) -> i64 {
    let response = app
        .request("POST", "/api/events", Some(body), Some(token))
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_create_event_defaults_and_validation() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;

    let untitled = app
        .request("POST", "/api/events", Some(json!({ "title": "  " })), Some(&token))
        .await;
    assert_eq!(untitled.status, StatusCode::BAD_REQUEST);
    assert_eq!(untitled.message(), "Title is required");

    let response = app
        .request(
            "POST",
            "/api/events",
            Some(json!({ "title": "Gala", "location": "Town Hall" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["is_published"], true);
    assert_eq!(response.body["display_order"], 0);
    assert_eq!(response.body["location"], "Town Hall");
}

#[tokio::test]
async fn test_public_listing_hides_drafts() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;
    create_event(&app, &token, json!({ "title": "Public" })).await;
    create_event(&app, &token, json!({ "title": "Draft", "isPublished": false })).await;

    let public = app.request("GET", "/api/events", None, None).await;
    let events = public.body["events"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["title"], "Public");
    assert!(events[0]["images"].as_array().unwrap().is_empty());

    let all = app.request("GET", "/api/admin/events", None, Some(&token)).await;
    assert_eq!(all.body["events"].as_array().unwrap().len(), 2);

    let anonymous = app.request("GET", "/api/admin/events", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_publish_toggle_is_audited() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;
    let id = create_event(&app, &token, json!({ "title": "Picnic", "link": "https://x" })).await;
    let path = format!("/api/events/{id}");

    let hidden = app
        .request("PUT", &path, Some(json!({ "isPublished": false })), Some(&token))
        .await;
    assert_eq!(hidden.status, StatusCode::OK);
    assert_eq!(hidden.body["is_published"], false);

    let edited = app
        .request(
            "PUT",
            &path,
            Some(json!({ "title": "Summer Picnic", "link": null })),
            Some(&token),
        )
        .await;
    assert_eq!(edited.body["title"], "Summer Picnic");
    assert_eq!(edited.body["link"], Value::Null);

    let shown = app
        .request("PUT", &path, Some(json!({ "isPublished": true })), Some(&token))
        .await;
    assert_eq!(shown.body["is_published"], true);

    let missing = app
        .request("PUT", "/api/events/9999", Some(json!({ "title": "x" })), Some(&token))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.message(), "Event not found");

    let actions: Vec<String> = app
        .audit_actions()
        .await
        .into_iter()
        .map(|(action, _)| action)
        .collect();
    assert_eq!(actions, ["publish", "update", "unpublish", "create"]);

    let entries = app.audit_entries().await;
    let published = &entries[0];
    assert_eq!(published.entity_id, Some(id));
    let (before, after) = (
        published.previous_data.as_ref().unwrap(),
        published.new_data.as_ref().unwrap(),
    );
    assert_eq!(before["is_published"], false);
    assert_eq!(after["is_published"], true);
    assert_eq!(before["title"], "Summer Picnic");
    assert_eq!(after["title"], "Summer Picnic");

    let edit = &entries[1];
    let (before, after) = (
        edit.previous_data.as_ref().unwrap(),
        edit.new_data.as_ref().unwrap(),
    );
    assert_eq!(before["title"], "Picnic");
    assert_eq!(before["link"], "https://x");
    assert_eq!(after["title"], "Summer Picnic");
    assert_eq!(after["link"], Value::Null);
    assert_eq!(after["is_published"], false);
}

#[tokio::test]
async fn test_reorder_events() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;
    let first = create_event(&app, &token, json!({ "title": "First" })).await;
    let second = create_event(&app, &token, json!({ "title": "Second" })).await;

    let not_array = app
        .request(
            "PUT",
            "/api/events/reorder",
            Some(json!({ "updates": "nope" })),
            Some(&token),
        )
        .await;
    assert_eq!(not_array.status, StatusCode::BAD_REQUEST);
    assert_eq!(not_array.message(), "Updates array is required");

    let response = app
        .request(
            "PUT",
            "/api/events/reorder",
            Some(json!({ "updates": [
                { "id": first, "displayOrder": 2 },
                { "id": second, "displayOrder": 1 },
            ] })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Events reordered successfully");

    let listed = app.request("GET", "/api/events", None, None).await;
    assert_eq!(listed.body["events"][0]["title"], "Second");
    assert_eq!(listed.body["events"][1]["title"], "First");
    assert_eq!(
        app.audit_actions().await[0],
        ("reorder".to_string(), "event".to_string())
    );
}

#[tokio::test]
async fn test_gallery_upload_reorder_and_delete() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;
    let id = create_event(&app, &token, json!({ "title": "Fundraiser" })).await;
    let images_path = format!("/api/events/{id}/images");

    let uploaded = app
        .upload(
            &images_path,
            "images",
            &[("one.png", "image/png", PNG), ("two.jpg", "image/jpeg", JPEG)],
            &token,
        )
        .await;
    assert_eq!(uploaded.status, StatusCode::CREATED, "{:?}", uploaded.body);
    let images = uploaded.body["images"].as_array().unwrap().clone();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0]["display_order"], 0);
    assert_eq!(images[1]["display_order"], 1);
    let first_url = images[0]["image_url"].as_str().unwrap().to_string();
    assert!(first_url.starts_with(&format!("/uploads/events/{id}/")));
    assert!(images[0].get("storage_key").is_none());

    let served = app.request("GET", &first_url, None, None).await;
    assert_eq!(served.status, StatusCode::OK);

    let first_id = images[0]["id"].as_i64().unwrap();
    let second_id = images[1]["id"].as_i64().unwrap();

    let bad_reorder = app
        .request(
            "PUT",
            &format!("{images_path}/reorder"),
            Some(json!({ "imageIds": 5 })),
            Some(&token),
        )
        .await;
    assert_eq!(bad_reorder.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_reorder.message(), "imageIds must be an array");

    let reordered = app
        .request(
            "PUT",
            &format!("{images_path}/reorder"),
            Some(json!({ "imageIds": [second_id, first_id] })),
            Some(&token),
        )
        .await;
    assert_eq!(reordered.status, StatusCode::OK);
    let listed = app.request("GET", &images_path, None, None).await;
    assert_eq!(listed.body["images"][0]["id"].as_i64(), Some(second_id));

    let deleted = app
        .request(
            "DELETE",
            &format!("{images_path}/{first_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    let gone = app.request("GET", &first_url, None, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let again = app
        .request(
            "DELETE",
            &format!("{images_path}/{first_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.message(), "Image not found");

    let entities: Vec<String> = app
        .audit_actions()
        .await
        .into_iter()
        .map(|(action, entity)| format!("{action}:{entity}"))
        .collect();
    assert_eq!(
        entities,
        [
            "delete:event_image",
            "reorder:event_images",
            "create:event_images",
            "create:event",
        ]
    );
}

#[tokio::test]
async fn test_gallery_upload_errors() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;
    let id = create_event(&app, &token, json!({ "title": "Auction" })).await;

    let no_files = app
        .upload(&format!("/api/events/{id}/images"), "other", &[("a.png", "image/png", PNG)], &token)
        .await;
    assert_eq!(no_files.status, StatusCode::BAD_REQUEST);
    assert_eq!(no_files.message(), "No files uploaded");

    let unknown_event = app
        .upload("/api/events/9999/images", "images", &[("a.png", "image/png", PNG)], &token)
        .await;
    assert_eq!(unknown_event.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown_event.message(), "Event not found");

    let bad_id = app.request("GET", "/api/events/abc/images", None, None).await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_event_removes_gallery_files() {
    let app = TestApp::new().await;
    let token = app.login_admin().await;
    let id = create_event(&app, &token, json!({ "title": "Concert" })).await;
    let uploaded = app
        .upload(
            &format!("/api/events/{id}/images"),
            "images",
            &[("a.png", "image/png", PNG)],
            &token,
        )
        .await;
    let url = uploaded.body["images"][0]["image_url"]
        .as_str()
        .unwrap()
        .to_string();

    let deleted = app
        .request("DELETE", &format!("/api/events/{id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app.request("GET", &url, None, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    let listed = app.request("GET", "/api/admin/events", None, Some(&token)).await;
    assert!(listed.body["events"].as_array().unwrap().is_empty());

    let again = app
        .request("DELETE", &format!("/api/events/{id}"), None, Some(&token))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}
