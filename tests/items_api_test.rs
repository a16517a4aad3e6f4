mod common;

use axum::http::{Method, StatusCode};
use common::{gas_argon, TestApp};
use serde_json::json;

#[tokio::test]
async fn item_crud_round_trip() {
    let app = TestApp::new().await;
    let warehouse_id = app.create_warehouse("WH-001", "Gudang Utama").await;
    let created = app.create_item(gas_argon(warehouse_id), 0).await;
    let item_id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["status"], "active");
    assert_eq!(created["history"]["user_id"], 0);

    let (status, list) = app.get("/api/v1/items").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, body) = app.delete(&format!("/api/v1/items/{}", item_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item deleted successfully");

    let (status, body) = app.get(&format!("/api/v1/items/{}", item_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Item not found");
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn invalid_bodies_are_bad_requests() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/v1/items", json!({ "code": "", "name": "Nameless" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some());

    let (status, body) = app.post("/api/v1/items", json!({ "code": "X1" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");

    let mut negative = gas_argon(1);
    negative["price"] = json!("-1");
    let (status, body) = app.post("/api/v1/items", negative).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Price must not be negative");
}

#[tokio::test]
async fn price_beyond_the_column_is_rejected_before_insert() {
    let app = TestApp::new().await;
    let warehouse_id = app.create_warehouse("WH-001", "Gudang Utama").await;

    let mut huge = gas_argon(warehouse_id);
    huge["quantity"] = json!(2_000_000_000);
    huge["price"] = json!("70000000000000000000");
    let (status, body) = app.post("/api/v1/items", huge).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Price must not exceed 999999999999999999.99"
    );

    let (_, items) = app.get("/api/v1/items").await;
    assert!(items.as_array().unwrap().is_empty());
    let (_, history) = app.get("/api/v1/history").await;
    assert!(history.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn reduce_rejects_more_than_on_hand_and_non_positive_amounts() {
    let app = TestApp::new().await;
    let warehouse_id = app.create_warehouse("WH-001", "Gudang Utama").await;
    let created = app.create_item(gas_argon(warehouse_id), 7).await;
    let item_id = created["data"]["id"].as_i64().unwrap();

    let (status, body) = app
        .post(
            &format!("/api/v1/items/{}/reduce", item_id),
            json!({ "amount": 6, "reason": "too many" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("Insufficient stock"));

    let (status, _) = app
        .post(
            &format!("/api/v1/items/{}/reduce", item_id),
            json!({ "amount": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, item) = app.get(&format!("/api/v1/items/{}", item_id)).await;
    assert_eq!(item["quantity"], 5);

    let (_, history) = app.get(&format!("/api/v1/history/item/{}", item_id)).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn batch_delete_removes_listed_items() {
    let app = TestApp::new().await;
    let warehouse_id = app.create_warehouse("WH-001", "Gudang Utama").await;
    let mut ids = Vec::new();
    for code in ["A1", "A2", "A3"] {
        let mut item = gas_argon(warehouse_id);
        item["code"] = json!(code);
        let body = app.create_item(item, 1).await;
        ids.push(body["data"]["id"].as_i64().unwrap());
    }

    let (status, body) = app
        .request(
            Method::DELETE,
            "/api/v1/items/batch",
            Some(json!({ "ids": [ids[0], ids[2]] })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["deleted"], 2);

    let (_, list) = app.get("/api/v1/items").await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], ids[1]);

    let (status, _) = app
        .request(
            Method::DELETE,
            "/api/v1/items/batch",
            Some(json!({ "ids": [] })),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn root_and_health_routes_respond() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Stockroom API is running");
    assert_eq!(body["status"], "ok");

    let (status, body) = app.get("/health/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);

    let (status, body) = app.get("/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/history"].is_object());
}
