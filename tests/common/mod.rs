// Common test utilities and helper structs
// Shared across all test files to avoid duplication
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, HeaderMap, Request, Response, StatusCode},
    Router,
};
use serde::Serialize;
use shortlink_backend::{
    build_router,
    db::{AnalyticsPage, StoreError},
    models::{Click, Link, NewClick, NewLink},
    AppConfig, AppState, FraudCheck, LinkStore, MemoryLinkStore, RedisConfig, RedisPool,
    ServiceError,
};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

/// Fraud check with queued verdicts; valid once the queue is empty
#[derive(Default)]
pub struct ScriptedFraudCheck {
    verdicts: Mutex<VecDeque<bool>>,
    calls: AtomicUsize,
}

impl ScriptedFraudCheck {
    pub fn push_verdicts(&self, verdicts: &[bool]) {
        self.verdicts.lock().unwrap().extend(verdicts.iter().copied());
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FraudCheck for ScriptedFraudCheck {
    async fn validate(
        &self,
        _ip_address: Option<&str>,
        _user_agent: Option<&str>,
    ) -> Result<bool, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.verdicts.lock().unwrap().pop_front().unwrap_or(true))
    }
}

/// Delegates to a memory store, failing the operations switched off
#[derive(Default)]
pub struct FaultyStore {
    inner: MemoryLinkStore,
    fail_ping: AtomicBool,
    fail_clicks: AtomicBool,
}

impl FaultyStore {
    pub fn fail_ping(&self) {
        self.fail_ping.store(true, Ordering::SeqCst);
    }

    pub fn fail_clicks(&self) {
        self.fail_clicks.store(true, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &MemoryLinkStore {
        &self.inner
    }

    fn outage() -> StoreError {
        StoreError::Pool("connection refused".to_string())
    }
}

#[async_trait]
impl LinkStore for FaultyStore {
    async fn find_by_original_url(&self, url: &str) -> Result<Option<Link>, StoreError> {
        self.inner.find_by_original_url(url).await
    }

    async fn find_by_short_code(&self, code: &str) -> Result<Option<Link>, StoreError> {
        self.inner.find_by_short_code(code).await
    }

    async fn short_code_exists(&self, code: &str) -> Result<bool, StoreError> {
        self.inner.short_code_exists(code).await
    }

    async fn insert_link(&self, new_link: NewLink) -> Result<Link, StoreError> {
        self.inner.insert_link(new_link).await
    }

    async fn insert_click(&self, new_click: NewClick) -> Result<Click, StoreError> {
        if self.fail_clicks.load(Ordering::SeqCst) {
            return Err(Self::outage());
        }
        self.inner.insert_click(new_click).await
    }

    async fn analytics_page(&self, offset: i64, limit: i64) -> Result<AnalyticsPage, StoreError> {
        self.inner.analytics_page(offset, limit).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.fail_ping.load(Ordering::SeqCst) {
            return Err(Self::outage());
        }
        self.inner.ping().await
    }
}

/// App over a `FaultyStore`, for dependency failure paths
pub struct FaultyApp {
    pub app: Router,
    pub store: Arc<FaultyStore>,
    pub fraud: Arc<ScriptedFraudCheck>,
}

impl FaultyApp {
    pub fn get(&self, uri: &str) -> TestRequest {
        TestRequest::with_router(&self.app, "GET", uri)
    }

    pub fn post(&self, uri: &str) -> TestRequest {
        TestRequest::with_router(&self.app, "POST", uri)
    }

    pub async fn shorten(&self, url: &str) -> String {
        let response = self
            .post("/api/v1/link")
            .json(&serde_json::json!({ "original_url": url }))
            .send()
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: serde_json::Value = response.json().await;
        body["short_code"].as_str().unwrap().to_string()
    }
}

pub fn setup_faulty_app() -> FaultyApp {
    let config = AppConfig::for_tests();
    let store = Arc::new(FaultyStore::default());
    let fraud = Arc::new(ScriptedFraudCheck::default());
    let redis_pool = RedisPool::new(RedisConfig::from_app_config(&config)).unwrap();

    let state = AppState::new(Arc::new(config), store.clone(), fraud.clone(), redis_pool).unwrap();

    FaultyApp {
        app: build_router(state),
        store,
        fraud,
    }
}

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub store: Arc<MemoryLinkStore>,
    pub fraud: Arc<ScriptedFraudCheck>,
}

impl TestApp {
    /// Send a POST request
    pub fn post(&self, uri: &str) -> TestRequest {
        TestRequest::new(self, "POST", uri)
    }

    /// Send a GET request
    pub fn get(&self, uri: &str) -> TestRequest {
        TestRequest::new(self, "GET", uri)
    }

    /// Create a link through the API and return its short code
    pub async fn shorten(&self, url: &str) -> String {
        let response = self
            .post("/api/v1/link")
            .json(&serde_json::json!({ "original_url": url }))
            .send()
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body: serde_json::Value = response.json().await;
        body["short_code"].as_str().unwrap().to_string()
    }
}

/// Test request builder
pub struct TestRequest<'a> {
    router: &'a Router,
    method: String,
    uri: String,
    headers: Vec<(String, String)>,
    body: Body,
    custom_ip: Option<String>,
}

impl<'a> TestRequest<'a> {
    fn new(app: &'a TestApp, method: &str, uri: &str) -> Self {
        Self::with_router(&app.app, method, uri)
    }

    fn with_router(router: &'a Router, method: &str, uri: &str) -> Self {
        Self {
            router,
            method: method.to_string(),
            uri: uri.to_string(),
            headers: Vec::new(),
            body: Body::empty(),
            custom_ip: None,
        }
    }

    /// Add JSON body to request
    pub fn json<T: Serialize>(mut self, body: &T) -> Self {
        self.body = Body::from(serde_json::to_vec(body).unwrap());
        self.header("content-type", "application/json")
    }

    /// Raw body with an explicit content type
    pub fn raw(mut self, content_type: &str, body: &str) -> Self {
        self.body = Body::from(body.to_string());
        self.header("content-type", content_type)
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Set a custom client address, e.g. "203.0.113.5:4000"
    pub fn with_ip(mut self, ip: &str) -> Self {
        self.custom_ip = Some(ip.to_string());
        self
    }

    /// Send the request
    pub async fn send(self) -> TestResponse {
        let mut builder = Request::builder().method(self.method.as_str()).uri(&self.uri);
        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }
        let mut request = builder.body(self.body).unwrap();

        // Simulate the peer address the real server injects
        let ip_address = self
            .custom_ip
            .unwrap_or_else(|| "127.0.0.1:12345".to_string());
        request
            .extensions_mut()
            .insert(ConnectInfo(ip_address.parse::<SocketAddr>().unwrap()));

        let response = self.router.clone().oneshot(request).await.unwrap();

        TestResponse { response }
    }
}

/// Test response wrapper
pub struct TestResponse {
    response: Response<Body>,
}

impl TestResponse {
    /// Get status code
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.response.headers()
    }

    pub fn location(&self) -> Option<String> {
        self.response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string())
    }

    /// Parse JSON response
    pub async fn json<T: serde::de::DeserializeOwned>(self) -> T {
        let body = axum::body::to_bytes(self.response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    /// Get response body as text
    pub async fn text(self) -> String {
        let body = axum::body::to_bytes(self.response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }
}

/// Setup test application over the in-memory store
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(|_| {}).await
}

/// Same as `setup_test_app`, with a hook to adjust configuration
pub async fn setup_test_app_with(configure: impl FnOnce(&mut AppConfig)) -> TestApp {
    let mut config = AppConfig::for_tests();
    configure(&mut config);

    let store = Arc::new(MemoryLinkStore::new());
    let fraud = Arc::new(ScriptedFraudCheck::default());
    let redis_pool = RedisPool::new(RedisConfig::from_app_config(&config)).unwrap();

    let state = AppState::new(Arc::new(config), store.clone(), fraud.clone(), redis_pool).unwrap();
    let app = build_router(state.clone());

    TestApp {
        app,
        state,
        store,
        fraud,
    }
}
