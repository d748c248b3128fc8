//! HTTP round trips through the CRUD routes and the response envelope.

use axum::http::StatusCode;
use serde_json::json;

use crudkit_core::config::{AppConfig, ResponseConfig};
use crudkit_core::types::{IdentityStrategy, MatchPolicy};

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_is_wrapped() {
    let app = TestApp::new();
    let resp = app.request("GET", "/api/health", None).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["code"], 200);
    assert_eq!(resp.body["status"], "SUCCESS");
    assert_eq!(resp.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_page_by_example() {
    let app = TestApp::new();
    let resp = app
        .request(
            "POST",
            "/api/products/page",
            Some(json!({
                "example": { "category": "paint" },
                "page_size": 1,
                "page_index": 1
            })),
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    let data = &resp.body["data"];
    assert_eq!(data["total"], 2);
    assert_eq!(data["totalPages"], 2);
    assert_eq!(data["pageNumber"], 2);
    assert_eq!(data["list"].as_array().map(Vec::len), Some(1));
    assert_eq!(data["list"][0]["sku"], "B-2");
}

#[tokio::test]
async fn test_list_sorted_and_count() {
    let app = TestApp::new();
    let resp = app
        .request(
            "POST",
            "/api/products/list",
            Some(json!({ "example": { "category": "tools" }, "sort_field": "stock" })),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    let skus: Vec<_> = resp.body["data"]
        .as_array()
        .expect("list payload")
        .iter()
        .map(|p| p["sku"].clone())
        .collect();
    assert_eq!(skus, vec![json!("A-1"), json!("A-2")]);

    let count = app.request("POST", "/api/products/count", Some(json!({}))).await;
    assert_eq!(count.status, StatusCode::OK);
    assert_eq!(count.body["data"], 4);
}

#[tokio::test]
async fn test_save_then_get() {
    let app = TestApp::new();
    let saved = app
        .request(
            "POST",
            "/api/products",
            Some(json!({ "sku": "C-1", "category": "glue", "stock": 7 })),
        )
        .await;
    assert_eq!(saved.status, StatusCode::OK);
    let id = saved.body["data"]["id"]
        .as_str()
        .expect("generated id")
        .to_string();

    let fetched = app.request("GET", &format!("/api/products/{id}"), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["sku"], "C-1");
    assert_eq!(fetched.body["data"]["stock"], 7);
}

#[tokio::test]
async fn test_missing_id_is_not_found() {
    let app = TestApp::new();
    let resp = app.request("GET", "/api/products/nope", None).await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body["code"], 404);
    assert!(resp.body["data"].is_null());
}

#[tokio::test]
async fn test_delete_marks_rows() {
    let app = TestApp::new();
    let ids: Vec<String> = app
        .service
        .list_all()
        .expect("list products")
        .into_iter()
        .filter_map(|p| p.base.base.id)
        .take(2)
        .collect();

    let resp = app
        .request(
            "POST",
            "/api/products/delete",
            Some(json!({ "ids": [ids[0], ids[1], "ghost"], "deleter": "ops" })),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["data"], 2);

    let row = app
        .service
        .find_by_id(&ids[0])
        .expect("lookup")
        .expect("row still present");
    assert!(row.base.deleted);
    assert_eq!(row.base.deleter.as_deref(), Some("ops"));
}

#[tokio::test]
async fn test_malformed_body_is_validation_failure() {
    let app = TestApp::new();
    let resp = app
        .request("POST", "/api/products/count", Some(json!("not an object")))
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body["status"], "VALIDATE_FAILED");
}

#[tokio::test]
async fn test_password_check() {
    let app = TestApp::new();
    let weak = app
        .request("POST", "/api/passwords/check", Some(json!({ "password": "abc" })))
        .await;
    assert_eq!(weak.body["data"]["strong"], false);
    assert!(weak.body["data"]["message"].is_string());

    let strong = app
        .request(
            "POST",
            "/api/passwords/check",
            Some(json!({ "password": "Str0ng!Passw0rd" })),
        )
        .await;
    assert_eq!(strong.body["data"]["strong"], true);
}

#[tokio::test]
async fn test_wrapping_can_be_disabled() {
    let config = AppConfig {
        response: ResponseConfig {
            enabled: false,
            ..ResponseConfig::default()
        },
        ..TestApp::default_config()
    };
    let app = TestApp::with_config(config);
    let resp = app.request("POST", "/api/products/count", Some(json!({}))).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!(4));
}

#[tokio::test]
async fn test_page_metadata_uses_capped_size() {
    let mut config = TestApp::default_config();
    config.repository.max_page_size = 2;
    let app = TestApp::with_config(config);

    let first = app
        .request(
            "POST",
            "/api/products/page",
            Some(json!({ "page_size": 10, "page_index": 0 })),
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    let data = &first.body["data"];
    assert_eq!(data["list"].as_array().map(Vec::len), Some(2));
    assert_eq!(data["pageSize"], 2);
    assert_eq!(data["total"], 4);
    assert_eq!(data["totalPages"], 2);
    assert_eq!(data["pageNumber"], 1);

    let second = app
        .request(
            "POST",
            "/api/products/page",
            Some(json!({ "page_size": 10, "page_index": 2 })),
        )
        .await;
    let data = &second.body["data"];
    assert_eq!(data["pageNumber"], 2);
    assert_eq!(data["list"][0]["sku"], "B-1");
}

#[tokio::test]
async fn test_repository_follows_config() {
    let mut config = AppConfig::default();
    config.repository.match_policy = MatchPolicy::MatchAllFields;
    config.repository.identity_strategy = IdentityStrategy::AlwaysGenerate;
    let app = TestApp::with_config(config);

    // Every field constrains the example, including the null id.
    let listed = app
        .request(
            "POST",
            "/api/products/count",
            Some(json!({ "example": { "category": "paint" } })),
        )
        .await;
    assert_eq!(listed.body["data"], 0);

    let saved = app
        .request(
            "POST",
            "/api/products",
            Some(json!({ "id": "chosen", "sku": "C-9", "category": "glue", "stock": 1 })),
        )
        .await;
    assert_eq!(saved.status, StatusCode::OK);
    let id = saved.body["data"]["id"].as_str().expect("generated id");
    assert_ne!(id, "chosen");
}
