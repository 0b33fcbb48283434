//! Shared harness: the full router over an in-memory store and a temporary upload dir.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use inventory_admin::{app, AdminSeed, AppState, MemoryStore, UploadStore, UserService};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "----inventory-admin-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub uploads: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        UserService::seed_admin(store.as_ref(), &AdminSeed::default())
            .await
            .unwrap();
        let uploads = tempfile::tempdir().unwrap();
        let state = AppState::new(store, UploadStore::new(uploads.path()));
        TestApp {
            router: app(state, 1024 * 1024),
            uploads,
        }
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let (status, bytes) = self.send_raw(req).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn send_raw(&self, req: Request<Body>) -> (StatusCode, Vec<u8>) {
        let resp = self.router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    pub async fn json(&self, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request(method, uri, body)).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(empty_request(Method::GET, uri)).await
    }

    pub async fn empty(&self, method: Method, uri: &str) -> (StatusCode, Value) {
        self.send(empty_request(method, uri)).await
    }

    /// Sign up `userid` with valid details and return its generated id.
    pub async fn signup(&self, userid: &str) -> i64 {
        let (status, body) = self
            .json(
                Method::POST,
                "/api/auth/signup",
                serde_json::json!({
                    "name": "Test User",
                    "userid": userid,
                    "password": "password1",
                    "email": format!("{}@example.com", userid),
                    "contact": "0123456789"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        let (_, pending) = self.get("/api/auth/pending").await;
        pending
            .as_array()
            .unwrap()
            .iter()
            .find(|u| u["userid"] == userid)
            .and_then(|u| u["id"].as_i64())
            .unwrap()
    }
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Build a multipart/form-data request with text fields and an optional `image` file.
pub fn multipart_request(
    method: Method,
    uri: &str,
    fields: &[(&str, &str)],
    image: Option<(&str, &[u8])>,
) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}
