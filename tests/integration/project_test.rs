//! Project and health endpoint tests.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{TestApp, TestUser};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["storage"], "local");
}

#[tokio::test]
async fn test_create_project_requires_identity() {
    let app = TestApp::new().await;
    let response = app
        .request("POST", "/api/projects", Some(json!({ "title": "Anon" })), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_create_project_rejects_blank_title() {
    let app = TestApp::new().await;
    let owner = TestUser::new("Ada");
    let response = app
        .request("POST", "/api/projects", Some(json!({ "title": "   " })), Some(&owner))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_user_header_is_rejected() {
    let app = TestApp::new().await;
    let bogus = TestUser {
        id: "not-a-uuid".to_string(),
        name: "Bogus".to_string(),
    };
    let response = app
        .request("POST", "/api/projects", Some(json!({ "title": "x" })), Some(&bogus))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_project_summary() {
    let app = TestApp::new().await;
    let owner = TestUser::new("Ada");
    let pid = app.create_project(&owner, false).await;
    app.upload(&pid, Some(&owner), "a.txt", b"a").await;

    let response = app
        .request("GET", &format!("/api/projects/{pid}"), None, Some(&owner))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["id"], pid.as_str());
    assert_eq!(data["title"], "Test project");
    assert_eq!(data["is_public"], false);
    assert_eq!(data["user_can_edit"], true);
    assert_eq!(data["file_count"], 1);
}

#[tokio::test]
async fn test_unknown_project_is_not_found() {
    let app = TestApp::new().await;
    let owner = TestUser::new("Ada");

    let missing = uuid::Uuid::new_v4();
    let response = app
        .request("GET", &format!("/api/projects/{missing}/files"), None, Some(&owner))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("GET", "/api/projects/not-an-id", None, Some(&owner))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_component_requires_edit_on_parent() {
    let app = TestApp::new().await;
    let owner = TestUser::new("Ada");
    let stranger = TestUser::new("Mallory");
    let parent = app.create_project(&owner, true).await;

    let response = app
        .request(
            "POST",
            "/api/projects",
            Some(json!({ "title": "Child", "parent_id": parent })),
            Some(&stranger),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "POST",
            "/api/projects",
            Some(json!({ "title": "Child", "parent_id": parent })),
            Some(&owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["parent_id"], parent.as_str());
}
