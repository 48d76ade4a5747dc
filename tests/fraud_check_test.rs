// Latency behaviour of the simulated fraud check through the redirect path

mod common;

use axum::http::StatusCode;
use futures_util::future::join_all;
use shortlink_backend::{
    build_router, AppConfig, AppState, MemoryLinkStore, RedisConfig, RedisPool,
    SimulatedFraudCheck,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tower::util::ServiceExt;

async fn app_with_delay(delay: Duration) -> (axum::Router, Arc<MemoryLinkStore>) {
    let config = AppConfig::for_tests();
    let store = Arc::new(MemoryLinkStore::new());
    let fraud = Arc::new(SimulatedFraudCheck::new(delay, 1.0));
    let redis = RedisPool::new(RedisConfig::from_app_config(&config)).unwrap();
    let state = AppState::new(Arc::new(config), store.clone(), fraud, redis).unwrap();
    (build_router(state), store)
}

async fn create(app: &axum::Router, url: &str) -> String {
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/v1/link")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(
            serde_json::json!({ "original_url": url }).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
    value["short_code"].as_str().unwrap().to_string()
}

async fn visit(app: &axum::Router, code: &str) -> StatusCode {
    let request = axum::http::Request::builder()
        .uri(format!("/{}", code))
        .body(axum::body::Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap().status()
}

#[tokio::test(start_paused = true)]
async fn test_redirect_waits_for_fraud_check() {
    let (app, store) = app_with_delay(Duration::from_millis(100)).await;
    let code = create(&app, "https://example.com/").await;

    let start = Instant::now();
    assert_eq!(visit(&app, &code).await, StatusCode::SEE_OTHER);

    assert!(start.elapsed() >= Duration::from_millis(100));
    assert_eq!(store.click_count().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_redirects_take_one_delay_period() {
    let (app, store) = app_with_delay(Duration::from_millis(100)).await;
    let code = create(&app, "https://example.com/").await;

    let start = Instant::now();
    let statuses = join_all((0..20).map(|_| visit(&app, &code))).await;
    let elapsed = start.elapsed();

    assert!(statuses.iter().all(|s| *s == StatusCode::SEE_OTHER));
    assert!(elapsed >= Duration::from_millis(100));
    assert!(elapsed < Duration::from_millis(200), "took {:?}", elapsed);
    assert_eq!(store.click_count().await, 20);
}

#[tokio::test]
async fn test_scripted_check_is_used_by_default_harness() {
    let app = common::setup_test_app().await;
    let code = app.shorten("https://example.com/").await;

    let response = app.get(&format!("/{}", code)).send().await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(app.fraud.calls(), 1);
}
