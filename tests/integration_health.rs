#![allow(clippy::unwrap_used, clippy::panic, clippy::todo, clippy::missing_panics_doc, missing_debug_implementations, unreachable_pub)]
use axum::http::StatusCode;
mod common;

#[tokio::test]
async fn test_livez() {
    let app = common::TestApp::spawn().await;

    let resp = app.client.get(format!("{}/livez", app.mgmt_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readyz_happy_path() {
    let app = common::TestApp::spawn().await;

    let resp = app.client.get(format!("{}/readyz", app.mgmt_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    assert_eq!(body["email"], "ok");
}

#[tokio::test]
async fn test_readyz_database_error() {
    let faults = common::Faults { store_ping: true, ..Default::default() };
    let app = common::TestApp::spawn_with(common::get_test_config(), faults).await;

    let resp = app.client.get(format!("{}/readyz", app.mgmt_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["database"], "error");
    assert_eq!(body["email"], "ok");
}

#[tokio::test]
async fn test_readyz_email_error() {
    let faults = common::Faults { notifier_ping: true, ..Default::default() };
    let app = common::TestApp::spawn_with(common::get_test_config(), faults).await;

    let resp = app.client.get(format!("{}/readyz", app.mgmt_url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "error");
    assert_eq!(body["database"], "ok");
    assert_eq!(body["email"], "error");
}

#[tokio::test]
async fn test_health_routes_are_not_public() {
    let app = common::TestApp::spawn().await;

    let resp = app.client.get(format!("{}/readyz", app.url)).send().await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
