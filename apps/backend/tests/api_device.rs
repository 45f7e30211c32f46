//! Device registration and status API tests.
//!
//! These tests require a running PostgreSQL database.
//! Set DATABASE_URL environment variable before running.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;

use common::fixtures;
use common::TestContext;

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_device_creates_fresh_progress() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .post("/api/device/register")
        .json(&fixtures::device_register_request(Some("Phone")))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let token = body["token"].as_str().unwrap().to_string();
    let device_id = uuid::Uuid::parse_str(body["device_id"].as_str().unwrap()).unwrap();
    assert!(token.len() > 10);

    let progress = ctx.db.get_progress(device_id).await.unwrap();
    assert_eq!(progress.xp, 0);
    assert_eq!(progress.daily_goal, 20);
    assert_eq!(progress.hearts, 5);

    ctx.cleanup_device(device_id).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_device_without_body() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server.post("/api/device/register").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let device_id = uuid::Uuid::parse_str(body["device_id"].as_str().unwrap()).unwrap();

    ctx.cleanup_device(device_id).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_device_status_with_valid_token() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (device_id, token) = ctx.create_test_device(Some("Test Device")).await;

    let response = server
        .get("/api/device/status")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["device_id"].as_str().unwrap(), device_id.to_string());

    ctx.cleanup_device(device_id).await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_device_status_with_unknown_token() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .get("/api/device/status")
        .add_header(
            axum::http::header::AUTHORIZATION,
            "Bearer invalid-token-here",
        )
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_device_status_updates_last_seen() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (device_id, token) = ctx.create_test_device(None).await;
    let before = ctx.get_device_by_token(&token).await.unwrap().last_seen_at;

    tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

    server
        .get("/api/device/status")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .await
        .assert_status_ok();

    let after = ctx.get_device_by_token(&token).await.unwrap().last_seen_at;
    assert!(after >= before);

    ctx.cleanup_device(device_id).await;
}
