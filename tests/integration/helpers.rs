//! Shared test helpers for integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use bytes::Bytes;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use osf_api::app::{build_app, build_state};
use osf_core::config::AppConfig;

const BOUNDARY: &str = "osf-test-boundary";

/// A user identity forwarded through the proxy headers.
#[derive(Debug, Clone)]
pub struct TestUser {
    /// User id as sent in `X-User-Id`.
    pub id: String,
    /// Display name as sent in `X-User-Name`.
    pub name: String,
}

impl TestUser {
    /// A fresh user with a random id.
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
        }
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Upload root; removed on drop
    _dir: TempDir,
}

impl TestApp {
    /// Create a new test application backed by a temporary uploads root.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test application after adjusting the default config.
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut config = AppConfig::default();
        config.storage.uploads_root = dir.path().join("uploads").to_string_lossy().into_owned();
        config.storage.metadata_file = None;
        adjust(&mut config);

        let state = build_state(config)
            .await
            .expect("Failed to build state");

        Self {
            router: build_app(state),
            _dir: dir,
        }
    }

    /// Create a project owned by `owner` and return its id.
    pub async fn create_project(&self, owner: &TestUser, is_public: bool) -> String {
        let response = self
            .request(
                "POST",
                "/api/projects",
                Some(serde_json::json!({ "title": "Test project", "is_public": is_public })),
                Some(owner),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["data"]["id"]
            .as_str()
            .expect("No project id in response")
            .to_string()
    }

    /// Upload `content` as `filename` via multipart.
    pub async fn upload(
        &self,
        project: &str,
        user: Option<&TestUser>,
        filename: &str,
        content: &[u8],
    ) -> TestResponse {
        self.upload_with(project, user, filename, content, &[], None)
            .await
    }

    /// Upload with extra form fields and an optional `Referer`.
    pub async fn upload_with(
        &self,
        project: &str,
        user: Option<&TestUser>,
        filename: &str,
        content: &[u8],
        fields: &[(&str, &str)],
        referer: Option<&str>,
    ) -> TestResponse {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: text/plain\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let mut req = Request::builder()
            .method("POST")
            .uri(format!("/api/projects/{project}/files"))
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(referer) = referer {
            req = req.header("Referer", referer);
        }
        self.send(with_user(req, user), Body::from(body)).await
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        user: Option<&TestUser>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        self.send(with_user(req, user), Body::from(body_str)).await
    }

    async fn send(&self, req: axum::http::request::Builder, body: Body) -> TestResponse {
        let req = req.body(body).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let raw = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let body: Value = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            raw,
        }
    }
}

fn with_user(
    req: axum::http::request::Builder,
    user: Option<&TestUser>,
) -> axum::http::request::Builder {
    match user {
        Some(user) => req
            .header("X-User-Id", &user.id)
            .header("X-User-Name", &user.name),
        None => req,
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body (`Null` for non-JSON bodies)
    pub body: Value,
    /// Raw body bytes
    pub raw: Bytes,
}

impl TestResponse {
    /// Value of a response header as a string.
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}
