//! Shared test utilities for integration tests.
//!
//! `TestClient` drives the real router against an in-memory database. The
//! session cookie is set directly so individual tests don't have to go
//! through the login endpoint; auth_test covers that flow explicitly.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::routing::post;
use axum::{middleware, Router};
use http_body_util::BodyExt;
use serde_json::json;
use spendwise::auth;
use spendwise::config::Config;
use spendwise::db::{create_in_memory_pool, migrations};
use spendwise::handlers;
use spendwise::state::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;
use tower_cookies::CookieManagerLayer;

pub struct TestClient {
    pub state: AppState,
    cookie: String,
}

impl TestClient {
    /// Fresh in-memory database, logged in as the default test user.
    pub fn new() -> Self {
        Self::for_user("hari")
    }

    pub fn for_user(username: &str) -> Self {
        let pool = create_in_memory_pool().expect("Failed to create in-memory pool");
        {
            let conn = pool.get().expect("Failed to get connection");
            migrations::run_migrations(&conn).expect("Failed to run migrations");
        }

        let config = Config {
            host: "127.0.0.1".into(),
            port: 0,
            database_path: PathBuf::from(":memory:"),
            static_path: PathBuf::from("static"),
        };

        let state = AppState {
            db: pool,
            config: Arc::new(config),
        };

        Self {
            state,
            cookie: format!("{}={}", auth::SESSION_COOKIE, username),
        }
    }

    /// Second client over the same database acting as a different user.
    pub fn as_user(&self, username: &str) -> Self {
        Self {
            state: self.state.clone(),
            cookie: format!("{}={}", auth::SESSION_COOKIE, username),
        }
    }

    /// The production router (session middleware included) over this state.
    pub fn router(&self) -> Router {
        Router::new()
            .merge(handlers::routes())
            .route("/login", post(auth::login))
            .route("/logout", post(auth::logout))
            .layer(middleware::from_fn(auth::session_middleware))
            .layer(CookieManagerLayer::new())
            .with_state(self.state.clone())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.send(
            Request::builder()
                .uri(uri)
                .header(header::COOKIE, &self.cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// GET returning raw bytes, for the binary export endpoints.
    pub async fn get_bytes(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = self
            .router()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(header::COOKIE, &self.cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    /// GET without a session cookie.
    pub async fn get_anonymous(&self, uri: &str) -> (StatusCode, String) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> (StatusCode, String) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::COOKIE, &self.cookie)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn put_json(&self, uri: &str, body: serde_json::Value) -> (StatusCode, String) {
        self.send(
            Request::builder()
                .method("PUT")
                .uri(uri)
                .header(header::COOKIE, &self.cookie)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, String) {
        self.send(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .header(header::COOKIE, &self.cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Get JSON from an endpoint and parse it.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        uri: &str,
    ) -> (StatusCode, Option<T>) {
        let (status, body) = self.get(uri).await;
        let parsed = serde_json::from_str(&body).ok();
        (status, parsed)
    }

    /// POST /login and return the raw response for header inspection.
    pub async fn login_response(&self, username: &str) -> Response {
        self.router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json!({ "username": username }).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    // =========================================================================
    // Helper methods for creating entities through the API
    // =========================================================================

    /// Create a transaction via POST and return success status.
    pub async fn create_transaction(
        &self,
        date: &str,
        txn_type: &str,
        amount: f64,
        category: &str,
        description: &str,
    ) -> bool {
        let (status, _) = self
            .post_json(
                "/api/transactions",
                json!({
                    "date": date,
                    "type": txn_type,
                    "amount": amount,
                    "category": category,
                    "description": description,
                }),
            )
            .await;
        status == StatusCode::OK
    }

    /// Create a category via POST and return its id (panics on failure).
    pub async fn create_category(&self, name: &str) -> String {
        let (status, body) = self
            .post_json("/api/categories", json!({ "name": name }))
            .await;
        assert_eq!(status, StatusCode::OK, "create_category failed: {}", body);
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        value["id"].as_str().unwrap().to_string()
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}
