mod common;

use axum::http::StatusCode;
use common::{gas_argon, TestApp};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use serde_json::{json, Value};

struct Fixture {
    app: TestApp,
    item_id: i64,
    from: i64,
    to: i64,
}

async fn fixture() -> Fixture {
    let app = TestApp::new().await;
    let from = app.create_warehouse("WH-001", "Gudang Utama").await;
    let to = app.create_warehouse("WH-002", "Gudang Cabang").await;
    let created = app.create_item(gas_argon(from), 7).await;
    let item_id = created["data"]["id"].as_i64().unwrap();
    Fixture {
        app,
        item_id,
        from,
        to,
    }
}

fn transfer(f: &Fixture) -> Value {
    json!({
        "code": "TRF-1",
        "item_id": f.item_id,
        "from_warehouse_id": f.from,
        "to_warehouse_id": f.to,
        "quantity": 2,
    })
}

#[tokio::test]
async fn transfer_lifecycle_records_each_status() {
    let f = fixture().await;

    let (status, created) = f.app.post("/api/v1/transfers?user_id=4", transfer(&f)).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["message"], "Transfer saved successfully");
    assert_eq!(created["data"]["status"], "pending");
    assert_eq!(
        created["history"]["description"],
        "Transfer initiated: Gas Argon from Gudang Utama to Gudang Cabang"
    );
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, approved) = f
        .app
        .put(&format!("/api/v1/transfers/{}/approve?user_id=4", id), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["data"]["status"], "approved");
    assert_eq!(
        approved["history"]["description"],
        "Transfer approved: Gas Argon from Gudang Utama to Gudang Cabang"
    );

    let (status, completed) = f
        .app
        .put(&format!("/api/v1/transfers/{}/complete", id), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(completed["data"]["status"], "completed");
    assert_eq!(completed["history"]["status"], "completed");

    let (_, history) = f
        .app
        .get(&format!("/api/v1/history/warehouse/{}", f.from))
        .await;
    let transfers: Vec<&Value> = history
        .as_array()
        .unwrap()
        .iter()
        .filter(|r| r["type"] == "transfer")
        .collect();
    assert_eq!(transfers.len(), 3);
}

#[tokio::test]
async fn unmapped_status_falls_back_to_generic_description() {
    let f = fixture().await;
    let mut body = transfer(&f);
    body["status"] = json!("on_hold");

    let (status, created) = f.app.post("/api/v1/transfers", body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["history"]["description"], "Transfer on_hold: Gas Argon");
}

#[tokio::test]
async fn in_transit_update_uses_its_own_description() {
    let f = fixture().await;
    let (_, created) = f.app.post("/api/v1/transfers", transfer(&f)).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let mut body = transfer(&f);
    body["status"] = json!("in_transit");
    let (status, updated) = f
        .app
        .put(&format!("/api/v1/transfers/{}?user_id=4", id), body)
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["data"]["status"], "in_transit");
    assert_eq!(
        updated["history"]["description"],
        "Transfer in transit: Gas Argon from Gudang Utama to Gudang Cabang"
    );
    assert_eq!(updated["history"]["user_id"], 4);
}

#[tokio::test]
async fn failed_history_write_keeps_the_transfer() {
    let f = fixture().await;
    f.app
        .state
        .db
        .execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            "DROP TABLE transactions".to_string(),
        ))
        .await
        .expect("drop history table");

    let (status, created) = f.app.post("/api/v1/transfers", transfer(&f)).await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(
        created["message"],
        "Transfer saved successfully (history creation failed)"
    );
    assert!(created["history_error"].as_str().is_some());
    assert!(created.get("history").is_none());
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, approved) = f
        .app
        .put(&format!("/api/v1/transfers/{}/approve", id), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        approved["message"],
        "Transfer saved successfully (history creation failed)"
    );
    assert!(approved["history_error"].as_str().is_some());

    let (status, stored) = f.app.get(&format!("/api/v1/transfers/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored["status"], "approved");
    assert_eq!(stored["code"], "TRF-1");
}

#[tokio::test]
async fn transfer_input_is_checked() {
    let f = fixture().await;

    let mut same = transfer(&f);
    same["to_warehouse_id"] = json!(f.from);
    let (status, _) = f.app.post("/api/v1/transfers", same).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut zero = transfer(&f);
    zero["quantity"] = json!(0);
    let (status, _) = f.app.post("/api/v1/transfers", zero).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut missing = transfer(&f);
    missing["to_warehouse_id"] = json!(999);
    let (status, body) = f.app.post("/api/v1/transfers", missing).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Warehouse not found");

    let (status, body) = f
        .app
        .put("/api/v1/transfers/999/approve", json!({}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Transfer not found");
}
