//! File upload, render, download, and delete tests.

use std::io::{Cursor, Write};

use axum::http::StatusCode;
use zip::write::SimpleFileOptions;

use crate::helpers::{TestApp, TestUser};

fn zip_of(names: &[&str]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for name in names {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"payload").unwrap();
    }
    writer.finish().unwrap().into_inner()
}

#[tokio::test]
async fn test_upload_returns_created_file_info() {
    let app = TestApp::new().await;
    let owner = TestUser::new("Ada");
    let pid = app.create_project(&owner, false).await;

    let response = app
        .upload(&pid, Some(&owner), "notes.txt", b"hello world")
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let info = &response.body[0];
    assert_eq!(info["name"], "notes.txt");
    assert_eq!(info["ext"], "txt");
    assert_eq!(info["type"], "file");
    assert_eq!(info["size"], "11");
    assert_eq!(info["can_edit"], true);
    assert_eq!(
        info["download"],
        format!("/api/projects/{pid}/files/notes.txt/download")
    );
}

#[tokio::test]
async fn test_identical_upload_is_not_modified() {
    let app = TestApp::new().await;
    let owner = TestUser::new("Ada");
    let pid = app.create_project(&owner, false).await;

    app.upload(&pid, Some(&owner), "notes.txt", b"same").await;
    let response = app.upload(&pid, Some(&owner), "notes.txt", b"same").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body[0]["action_taken"].is_null());
    assert_eq!(response.body[0]["name"], "notes.txt");
    assert_eq!(response.body[0]["message"], "File notes.txt is not modified");

    let view = app
        .request("GET", &format!("/api/projects/{pid}/files/notes.txt"), None, Some(&owner))
        .await;
    assert_eq!(view.body["versions"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_upload_with_redirect_follows_referer() {
    let app = TestApp::new().await;
    let owner = TestUser::new("Ada");
    let pid = app.create_project(&owner, false).await;

    let response = app
        .upload_with(
            &pid,
            Some(&owner),
            "notes.txt",
            b"data",
            &[("redirect", "1")],
            Some("/project/files/page"),
        )
        .await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(response.header("location"), "/project/files/page");
}

#[tokio::test]
async fn test_upload_sanitizes_file_name() {
    let app = TestApp::new().await;
    let owner = TestUser::new("Ada");
    let pid = app.create_project(&owner, false).await;

    let response = app
        .upload(&pid, Some(&owner), "../../etc/my notes.txt", b"data")
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body[0]["name"], "etc_my_notes.txt");
}

#[tokio::test]
async fn test_render_text_file_view_model() {
    let app = TestApp::new().await;
    let owner = TestUser::new("Ada");
    let pid = app.create_project(&owner, false).await;

    app.upload(&pid, Some(&owner), "notes.txt", b"first draft").await;
    app.upload(&pid, Some(&owner), "notes.txt", b"second draft").await;

    let response = app
        .request("GET", &format!("/api/projects/{pid}/files/notes.txt"), None, Some(&owner))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let view = &response.body;
    assert_eq!(view["file_name"], "notes.txt");
    assert_eq!(view["renderer"], "pygments");
    assert!(view["rendered"].as_str().unwrap().contains("second draft"));
    assert_eq!(view["node"]["id"], pid.as_str());

    let versions = view["versions"].as_array().unwrap();
    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0]["number"], 2);
    assert_eq!(versions[0]["display_number"], "current");
    assert_eq!(versions[0]["committer_name"], "Ada");
    assert_eq!(versions[1]["number"], 1);
    assert_eq!(versions[1]["display_number"], 1);
}

#[tokio::test]
async fn test_render_too_large_file_uses_placeholder() {
    let app = TestApp::with_config(|c| c.render.max_render_size_bytes = 16).await;
    let owner = TestUser::new("Ada");
    let pid = app.create_project(&owner, false).await;

    app.upload(&pid, Some(&owner), "big.txt", &[b'x'; 64]).await;

    let response = app
        .request("GET", &format!("/api/projects/{pid}/files/big.txt"), None, Some(&owner))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["renderer"], "default");
    let rendered = response.body["rendered"].as_str().unwrap();
    assert!(rendered.contains("too large to be rendered online"));
    assert!(rendered.contains(&format!("/api/projects/{pid}/files/big.txt/download")));
}

#[tokio::test]
async fn test_render_zip_lists_entries_to_default_depth() {
    let app = TestApp::new().await;
    let owner = TestUser::new("Ada");
    let pid = app.create_project(&owner, false).await;

    let archive = zip_of(&["top.txt", "dir/inner.txt", "dir/sub/deep.txt"]);
    app.upload(&pid, Some(&owner), "bundle.zip", &archive).await;

    let response = app
        .request("GET", &format!("/api/projects/{pid}/files/bundle.zip"), None, Some(&owner))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let rendered = response.body["rendered"].as_str().unwrap();
    assert!(rendered.contains("This archive contains the following files:"));
    assert!(rendered.contains("top.txt"));
    assert!(rendered.contains("inner.txt"));
    assert!(!rendered.contains("deep.txt"));
}

#[tokio::test]
async fn test_render_image_uses_img_tag() {
    let app = TestApp::new().await;
    let owner = TestUser::new("Ada");
    let pid = app.create_project(&owner, false).await;

    app.upload(&pid, Some(&owner), "plot.PNG", b"\x89PNG fake").await;

    let response = app
        .request("GET", &format!("/api/projects/{pid}/files/plot.PNG"), None, Some(&owner))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["renderer"], "default");
    let rendered = response.body["rendered"].as_str().unwrap();
    assert!(rendered.contains("<img"));
    assert!(rendered.contains(&format!("/api/projects/{pid}/files/plot.PNG/download?1")));
}

#[tokio::test]
async fn test_render_unknown_file_is_not_found() {
    let app = TestApp::new().await;
    let owner = TestUser::new("Ada");
    let pid = app.create_project(&owner, false).await;

    let response = app
        .request("GET", &format!("/api/projects/{pid}/files/missing.txt"), None, Some(&owner))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request(
            "GET",
            &format!("/api/projects/{pid}/files/missing.txt/download"),
            None,
            Some(&owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download_redirects_to_latest_version() {
    let app = TestApp::new().await;
    let owner = TestUser::new("Ada");
    let pid = app.create_project(&owner, false).await;

    app.upload(&pid, Some(&owner), "notes.txt", b"one").await;
    app.upload(&pid, Some(&owner), "notes.txt", b"two").await;

    let response = app
        .request(
            "GET",
            &format!("/api/projects/{pid}/files/notes.txt/download"),
            None,
            Some(&owner),
        )
        .await;

    assert_eq!(response.status, StatusCode::FOUND);
    assert_eq!(
        response.header("location"),
        format!("/api/projects/{pid}/files/notes.txt/download/version/2")
    );
}

#[tokio::test]
async fn test_download_by_version() {
    let app = TestApp::new().await;
    let owner = TestUser::new("Ada");
    let pid = app.create_project(&owner, false).await;

    app.upload(&pid, Some(&owner), "notes.txt", b"one").await;
    app.upload(&pid, Some(&owner), "notes.txt", b"two").await;

    let current = app
        .request(
            "GET",
            &format!("/api/projects/{pid}/files/notes.txt/download/version/2"),
            None,
            Some(&owner),
        )
        .await;
    assert_eq!(current.status, StatusCode::OK);
    assert_eq!(current.raw.as_ref(), b"two");
    assert_eq!(
        current.header("content-disposition"),
        "attachment; filename=\"notes.txt\""
    );
    assert_eq!(current.header("content-length"), "3");

    let old = app
        .request(
            "GET",
            &format!("/api/projects/{pid}/files/notes.txt/download/version/1"),
            None,
            Some(&owner),
        )
        .await;
    assert_eq!(old.status, StatusCode::OK);
    assert_eq!(old.raw.as_ref(), b"one");

    let disposition = old.header("content-disposition");
    let name = disposition
        .strip_prefix("attachment; filename=\"")
        .and_then(|s| s.strip_suffix('"'))
        .unwrap();
    let stamp = name
        .strip_prefix("notes_")
        .and_then(|s| s.strip_suffix(".txt"))
        .unwrap();
    assert_eq!(stamp.len(), 14);
    assert!(stamp.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn test_download_out_of_range_version_is_not_found() {
    let app = TestApp::new().await;
    let owner = TestUser::new("Ada");
    let pid = app.create_project(&owner, false).await;

    app.upload(&pid, Some(&owner), "notes.txt", b"one").await;

    for vid in ["0", "2", "99"] {
        let response = app
            .request(
                "GET",
                &format!("/api/projects/{pid}/files/notes.txt/download/version/{vid}"),
                None,
                Some(&owner),
            )
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "version {vid}");
    }
}

#[tokio::test]
async fn test_downloads_are_counted() {
    let app = TestApp::new().await;
    let owner = TestUser::new("Ada");
    let pid = app.create_project(&owner, false).await;

    app.upload(&pid, Some(&owner), "notes.txt", b"one").await;
    app.upload(&pid, Some(&owner), "notes.txt", b"two").await;

    for _ in 0..2 {
        app.request(
            "GET",
            &format!("/api/projects/{pid}/files/notes.txt/download/version/1"),
            None,
            Some(&owner),
        )
        .await;
    }

    let view = app
        .request("GET", &format!("/api/projects/{pid}/files/notes.txt"), None, Some(&owner))
        .await;
    let versions = view.body["versions"].as_array().unwrap();
    assert_eq!(versions[0]["total"], 0);
    assert_eq!(versions[1]["total"], 2);

    let listing = app
        .request("GET", &format!("/api/projects/{pid}/files"), None, Some(&owner))
        .await;
    assert_eq!(listing.body[0]["downloads"], 2);
}

#[tokio::test]
async fn test_list_files_and_paths() {
    let app = TestApp::new().await;
    let owner = TestUser::new("Ada");
    let pid = app.create_project(&owner, true).await;

    app.upload(&pid, Some(&owner), "a.txt", b"a").await;
    app.upload(&pid, Some(&owner), "b.csv", b"b").await;

    let listing = app
        .request("GET", &format!("/api/projects/{pid}/files"), None, None)
        .await;
    assert_eq!(listing.status, StatusCode::OK);
    let mut names: Vec<&str> = listing
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    names.sort_unstable();
    assert_eq!(names, ["a.txt", "b.csv"]);
    assert_eq!(listing.body[0]["can_edit"], false);

    let paths = app
        .request("GET", &format!("/api/projects/{pid}/files/paths"), None, None)
        .await;
    assert_eq!(paths.status, StatusCode::OK);
    assert_eq!(paths.body["files"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_delete_file() {
    let app = TestApp::new().await;
    let owner = TestUser::new("Ada");
    let pid = app.create_project(&owner, false).await;

    app.upload(&pid, Some(&owner), "notes.txt", b"one").await;
    app.upload(&pid, Some(&owner), "notes.txt", b"two").await;

    let path = format!("/api/projects/{pid}/files/notes.txt");
    let response = app.request("DELETE", &path, None, Some(&owner)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!({}));

    let again = app.request("DELETE", &path, None, Some(&owner)).await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);

    let listing = app
        .request("GET", &format!("/api/projects/{pid}/files"), None, Some(&owner))
        .await;
    assert_eq!(listing.body.as_array().map(Vec::len), Some(0));

    // Earlier versions stay downloadable; the current copy is gone.
    let old = app
        .request("GET", &format!("{path}/download/version/1"), None, Some(&owner))
        .await;
    assert_eq!(old.status, StatusCode::OK);
    assert_eq!(old.raw.as_ref(), b"one");

    let current = app
        .request("GET", &format!("{path}/download/version/2"), None, Some(&owner))
        .await;
    assert_eq!(current.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_by_file_key_removes_current_copy() {
    let app = TestApp::new().await;
    let owner = TestUser::new("Ada");
    let pid = app.create_project(&owner, false).await;
    app.upload(&pid, Some(&owner), "a.txt", b"one").await;

    let response = app
        .request("DELETE", &format!("/api/projects/{pid}/files/a_txt"), None, Some(&owner))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let view = app
        .request("GET", &format!("/api/projects/{pid}/files/a.txt"), None, Some(&owner))
        .await;
    assert_eq!(view.status, StatusCode::NOT_FOUND);

    let current = app
        .request(
            "GET",
            &format!("/api/projects/{pid}/files/a.txt/download/version/1"),
            None,
            Some(&owner),
        )
        .await;
    assert_eq!(current.status, StatusCode::NOT_FOUND);

    // Re-uploading the same bytes is a fresh file, not "not modified".
    let again = app.upload(&pid, Some(&owner), "a.txt", b"one").await;
    assert_eq!(again.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_private_project_access() {
    let app = TestApp::new().await;
    let owner = TestUser::new("Ada");
    let stranger = TestUser::new("Mallory");
    let pid = app.create_project(&owner, false).await;
    app.upload(&pid, Some(&owner), "notes.txt", b"secret").await;

    let path = format!("/api/projects/{pid}/files/notes.txt");

    let anonymous = app.request("GET", &path, None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let other = app.request("GET", &path, None, Some(&stranger)).await;
    assert_eq!(other.status, StatusCode::FORBIDDEN);

    let download = app
        .request("GET", &format!("{path}/download/version/1"), None, Some(&stranger))
        .await;
    assert_eq!(download.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_public_project_is_read_only_for_others() {
    let app = TestApp::new().await;
    let owner = TestUser::new("Ada");
    let stranger = TestUser::new("Mallory");
    let pid = app.create_project(&owner, true).await;
    app.upload(&pid, Some(&owner), "notes.txt", b"open").await;

    let path = format!("/api/projects/{pid}/files/notes.txt");

    let anonymous = app.request("GET", &path, None, None).await;
    assert_eq!(anonymous.status, StatusCode::OK);

    let upload = app.upload(&pid, Some(&stranger), "evil.txt", b"x").await;
    assert_eq!(upload.status, StatusCode::FORBIDDEN);

    let upload = app.upload(&pid, None, "evil.txt", b"x").await;
    assert_eq!(upload.status, StatusCode::UNAUTHORIZED);

    let delete = app.request("DELETE", &path, None, Some(&stranger)).await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);
}
