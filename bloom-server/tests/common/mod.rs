//! In-process test harness: in-memory database, full router, no network

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::response::Response;
use bloom_server::api::build_app;
use bloom_server::core::config::parse_registration_keys;
use bloom_server::db::DbService;
use bloom_server::{Config, ServerState};
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const PASSWORD: &str = "secret1";

pub struct TestApp {
    pub state: ServerState,
    app: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let config = Config {
            registration_keys: parse_registration_keys(
                "hq-key=honbu;mgr-key=manager+store-admin;staff-key=employee",
            ),
            ..Config::default()
        };
        let db = DbService::in_memory().await.unwrap();
        let state = ServerState::with_db(config, db);
        let app = build_app(&state);
        Self { state, app }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    /// Raw response, body left unread (SSE)
    pub async fn oneshot(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    /// Register through the public endpoint, returning `(token, uid)`
    pub async fn register(
        &self,
        email: &str,
        key: Option<&str>,
        store: Option<&str>,
    ) -> (String, String) {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({
                    "email": email,
                    "password": PASSWORD,
                    "registration_key": key,
                    "store": store,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register {email}: {body}");
        (
            body["token"].as_str().unwrap().to_string(),
            body["profile"]["uid"].as_str().unwrap().to_string(),
        )
    }

    pub async fn head_office(&self) -> String {
        self.register("hq@coffeebloom.de", Some("hq-key"), None).await.0
    }
}
