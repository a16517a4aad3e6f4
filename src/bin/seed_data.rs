//! Seed data script - populates the database with demo inventory
//!
//! Run with: cargo run --bin seed-data
//!
//! This creates:
//! - 2 warehouses
//! - 2 items (Gas Argon, Gas Oksigen), each with its `add` history record
//! - 1 pending transfer between the warehouses

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::{info, warn};

use stockroom_api::{
    config, db,
    services::{items::ItemInput, transfers::TransferInput, warehouses::WarehouseInput},
    AppState,
};

const SEED_USER_ID: i32 = 1;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("=== Stockroom Seed Data ===");

    let cfg = config::load_config().context("loading configuration")?;
    let pool = db::establish_connection_from_app_config(&cfg).await?;
    db::run_migrations(&pool).await?;
    let state = AppState::new(Arc::new(pool), cfg);
    let services = &state.services;

    if !services.items.list().await?.is_empty() {
        warn!("Items already present; skipping seed");
        return Ok(());
    }

    info!("Creating warehouses...");
    let main = services
        .warehouses
        .create(WarehouseInput {
            code: "WH-001".into(),
            name: "Gudang Utama".into(),
            address: "Jl. Industri No. 1".into(),
            city: "Jakarta".into(),
            province: "DKI Jakarta".into(),
            capacity: 1000,
            status: None,
        })
        .await?;
    let branch = services
        .warehouses
        .create(WarehouseInput {
            code: "WH-002".into(),
            name: "Gudang Cabang".into(),
            address: "Jl. Pelabuhan No. 8".into(),
            city: "Surabaya".into(),
            province: "Jawa Timur".into(),
            capacity: 500,
            status: None,
        })
        .await?;

    info!("Creating items...");
    let demo_items = [
        ("M090", "Gas Argon", 5, dec!(750000)),
        ("M091", "Gas Oksigen", 12, dec!(450000)),
    ];
    let mut created = Vec::new();
    for (code, name, quantity, price) in demo_items {
        let recorded = services
            .items
            .create(
                ItemInput {
                    code: code.into(),
                    name: name.into(),
                    brand: "Samator".into(),
                    category: "Gas Industri".into(),
                    unit: "tabung".into(),
                    quantity,
                    price,
                    status: None,
                    supplier: "PT Samator Gas".into(),
                    location: "Rak A".into(),
                    entry_date: NaiveDate::from_ymd_opt(2024, 1, 15),
                    description: format!("{} cylinder", name),
                    warehouse_id: Some(main.id),
                },
                SEED_USER_ID,
            )
            .await?;
        if !recorded.history.is_recorded() {
            warn!(item = name, "history record was not written");
        }
        created.push(recorded.entity);
    }

    if let Some(argon) = created.first() {
        info!("Creating transfer...");
        services
            .transfers
            .create(
                TransferInput {
                    code: "TRF-DEMO-1".into(),
                    item_id: argon.id,
                    from_warehouse_id: main.id,
                    to_warehouse_id: branch.id,
                    quantity: 2,
                    status: None,
                    transfer_date: None,
                    notes: "Demo transfer".into(),
                },
                SEED_USER_ID,
            )
            .await?;
    }

    info!("=== Seed Data Complete ===");
    info!("  curl http://localhost:8080/api/v1/items");
    info!("  curl http://localhost:8080/api/v1/history");

    Ok(())
}
