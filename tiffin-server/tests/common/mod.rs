//! Shared fixtures: an in-memory server driven in-process

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use serde_json::Value;
use shared::models::Role;
use tiffin_server::auth::{accounts, assign_role};
use tiffin_server::services::{ImageHost, ImageUpload, UploadError};
use tiffin_server::{Config, ServerState, build_app};
use tower::ServiceExt;

pub const STAFF_PASSWORD: &str = "kitchen-secret-1";

/// Records uploads instead of calling a real image host
#[derive(Default)]
pub struct FakeImageHost {
    pub uploads: Mutex<Vec<ImageUpload>>,
}

#[async_trait]
impl ImageHost for FakeImageHost {
    async fn upload(&self, image: ImageUpload) -> Result<String, UploadError> {
        let url = format!("https://images.test/{}", image.file_name);
        self.uploads.lock().unwrap().push(image);
        Ok(url)
    }
}

pub struct TestApp {
    pub state: ServerState,
    pub images: Arc<FakeImageHost>,
    app: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.bootstrap_admin = None;
        let images = Arc::new(FakeImageHost::default());
        let state = ServerState::in_memory(config, images.clone()).unwrap();
        let app = build_app(&state).with_state(state.clone());
        Self { state, images, app }
    }

    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Create an account, optionally give it a role, and return a token
    pub fn staff(&self, email: &str, role: Option<Role>) -> String {
        let user = accounts::create_account(&self.state.store, email, STAFF_PASSWORD).unwrap();
        if let Some(role) = role {
            assign_role(&self.state.store, &user.uid, role).unwrap();
        }
        self.state
            .get_jwt_service()
            .generate_token(&user.uid, &user.email)
            .unwrap()
    }

    pub fn admin(&self) -> String {
        self.staff("admin@tiffin.test", Some(Role::Admin))
    }

    pub fn chef(&self) -> String {
        self.staff("chef@tiffin.test", Some(Role::Chef))
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn call(
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
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.call(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.call(Method::POST, uri, token, Some(body)).await
    }
}

pub fn preorder_body(phone: &str) -> Value {
    serde_json::json!({
        "customer_info": {
            "name": "Arun",
            "phone": phone,
            "order_date": "2026-11-02",
            "order_time": "08:00"
        },
        "items": [
            {"menu_item_id": "idli", "name": "Classic Idli Sambar", "quantity": 2, "price": 120.0},
            {"menu_item_id": "dosa", "name": "Masala Dosa", "quantity": 1, "price": 150.0}
        ],
        "total_amount": 1.0
    })
}

/// Error code of an envelope
pub fn code(body: &Value) -> u64 {
    body["code"].as_u64().unwrap_or_default()
}
