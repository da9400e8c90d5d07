#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;
use tower_sessions::SessionStore;

use knapsack::config::AppConfig;
use knapsack::database::MemoryStore;
use knapsack::state::AppState;

/// Router over a fresh in-memory store. Each test builds its own.
pub struct TestApp {
    router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Result<Self> {
        Self::with_config(AppConfig::for_tests())
    }

    pub fn with_config(config: AppConfig) -> Result<Self> {
        Self::with_sessions(config, tower_sessions::MemoryStore::default())
    }

    /// Fresh data store, caller-supplied session store. Two apps built over
    /// the same session store accept each other's cookies.
    pub fn with_sessions<S>(config: AppConfig, sessions: S) -> Result<Self>
    where
        S: SessionStore + Clone,
    {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), config)?;
        let router = knapsack::app(state, sessions);
        Ok(Self { router, store })
    }

    /// A browser-like client with its own cookie jar.
    pub fn client(&self) -> TestClient {
        TestClient {
            router: self.router.clone(),
            cookie: None,
        }
    }

    /// Client replaying a captured `name=value` cookie.
    pub fn client_with_cookie(&self, cookie: &str) -> TestClient {
        TestClient {
            router: self.router.clone(),
            cookie: Some(cookie.to_string()),
        }
    }

    /// Client that has already signed up as `user_name`.
    pub async fn signed_up(&self, user_name: &str, password: &str) -> Result<TestClient> {
        let mut client = self.client();
        let res = client
            .post(
                "/api/signup",
                serde_json::json!({"username": user_name, "password": password}),
            )
            .await?;
        anyhow::ensure!(
            res.status == StatusCode::CREATED,
            "signup for {} failed: {} {}",
            user_name,
            res.status,
            res.body
        );
        Ok(client)
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Drives the router with `oneshot`, carrying the session cookie between
/// requests the way a browser would.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

impl TestClient {
    /// Client for a router assembled by the test itself.
    pub fn for_router(router: Router) -> Self {
        Self {
            router,
            cookie: None,
        }
    }

    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    pub async fn get(&mut self, path: &str) -> Result<TestResponse> {
        self.send(Method::GET, path, Body::empty(), None).await
    }

    pub async fn post(&mut self, path: &str, body: Value) -> Result<TestResponse> {
        self.send(
            Method::POST,
            path,
            Body::from(body.to_string()),
            Some("application/json"),
        )
        .await
    }

    pub async fn post_raw(&mut self, path: &str, raw: &'static str) -> Result<TestResponse> {
        self.send(Method::POST, path, Body::from(raw), Some("application/json"))
            .await
    }

    async fn send(
        &mut self,
        method: Method,
        path: &str,
        body: Body,
        content_type: Option<&str>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = builder.body(body).context("failed to build request")?;

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();

        for set_cookie in response.headers().get_all(header::SET_COOKIE) {
            self.store_cookie(set_cookie.to_str()?);
        }

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        Ok(TestResponse { status, body })
    }

    fn store_cookie(&mut self, set_cookie: &str) {
        let pair = set_cookie.split(';').next().unwrap_or_default().trim();
        let removed = pair.ends_with('=') || set_cookie.contains("Max-Age=0");
        self.cookie = if removed { None } else { Some(pair.to_string()) };
    }
}

/// Serve a fresh app over TCP on an unused port and return its base URL.
pub async fn spawn_server(config: AppConfig) -> Result<String> {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store, config)?;
    let app = knapsack::app(state, tower_sessions::MemoryStore::default());
    spawn_router(app).await
}

/// Serve any router on an unused local port.
pub async fn spawn_router(router: Router) -> Result<String> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    Ok(format!("http://127.0.0.1:{}", port))
}

pub fn titles(body: &Value) -> Vec<(String, String)> {
    body.as_array()
        .map(|books| {
            books
                .iter()
                .map(|b| {
                    (
                        b["title"].as_str().unwrap_or_default().to_string(),
                        b["author"].as_str().unwrap_or_default().to_string(),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}
