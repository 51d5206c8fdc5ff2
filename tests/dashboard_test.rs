mod common;

use api_hub::models::AuthType;
use api_hub::store::Collection;

use common::{Factory, TestApp};

#[tokio::test]
async fn test_dashboard_empty_catalog() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/dashboard").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let summary = &body["summary"];
    assert_eq!(summary["totalApis"].as_i64().unwrap(), 0);
    assert_eq!(summary["totalApiCalls"].as_i64().unwrap(), 0);
    assert_eq!(summary["popularCategories"].as_array().unwrap().len(), 0);
    assert_eq!(summary["topApis"].as_array().unwrap().len(), 0);
    assert!(summary["trendIsPlaceholder"].as_bool().unwrap());
}

#[tokio::test]
async fn test_dashboard_summary() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.store);
    let a = factory.create_category("A").await;
    let b = factory.create_category("B").await;

    for (name, category, calls) in [
        ("A1", &a, 100),
        ("A2", &a, 200),
        ("B1", &b, 50),
        ("B2", &b, 10),
        ("B3", &b, 5),
    ] {
        factory
            .create_api_with(name, Some(category), AuthType::None, Some(calls))
            .await;
    }

    let response = app.server.get("/api/dashboard").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let summary = &body["summary"];

    assert_eq!(summary["totalApis"].as_i64().unwrap(), 5);
    assert_eq!(summary["totalApiCalls"].as_i64().unwrap(), 365);
    // Everything was just created
    assert_eq!(summary["newApisLastMonth"].as_i64().unwrap(), 5);

    let top: Vec<(&str, i64)> = summary["topApis"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| (t["name"].as_str().unwrap(), t["calls"].as_i64().unwrap()))
        .collect();
    assert_eq!(top, vec![("A2", 200), ("A1", 100), ("B1", 50)]);

    assert_eq!(
        summary["popularCategories"],
        serde_json::json!([
            { "name": "B", "percentage": 60 },
            { "name": "A", "percentage": 40 }
        ])
    );
    assert!(body["warnings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_dashboard_degrades_when_store_unavailable() {
    let app = TestApp::new().await;
    let factory = Factory::new(&app.store);
    factory.create_api("Payment API").await;
    app.store.fail(Collection::Apis).await;

    let response = app.server.get("/api/dashboard").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["summary"]["totalApis"].as_i64().unwrap(), 0);
    assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
}
