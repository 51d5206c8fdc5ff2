mod common;

use api_hub::store::Collection;
use axum::http::StatusCode;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_list_categories_empty() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/categories").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"].as_i64().unwrap(), 0);
}

#[tokio::test]
async fn test_list_categories_sorted_by_name() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.store);
    factory.create_category("Weather").await;
    factory.create_category("Finance").await;

    let response = app.server.get("/api/categories").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"].as_i64().unwrap(), 2);
    assert_eq!(body["data"][0]["name"].as_str().unwrap(), "Finance");
    assert_eq!(body["data"][1]["name"].as_str().unwrap(), "Weather");
    assert_eq!(body["data"][0]["color"].as_str().unwrap(), "#3b82f6");
}

#[tokio::test]
async fn test_list_categories_store_unavailable() {
    let app = TestApp::new().await;
    app.store.fail(Collection::Categories).await;

    let response = app.server.get("/api/categories").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}
