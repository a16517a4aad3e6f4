use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal_macros::dec;
use stockroom_api::models::item;
use stockroom_api::services::history::{
    item_event_draft, reference_number, ItemAction, ReferencePrefix, Stamp, TransferNames,
    TransferStatus,
};

fn names() -> TransferNames {
    TransferNames {
        item: "Gas Argon".to_string(),
        from_warehouse: "Gudang Utama".to_string(),
        to_warehouse: "Gudang Cabang".to_string(),
    }
}

// Description rendering for each status branch
fn transfer_description_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer_description");
    let names = names();

    for status in ["pending", "approved", "in_transit", "completed", "on_hold"] {
        group.bench_with_input(BenchmarkId::from_parameter(status), status, |b, status| {
            b.iter(|| TransferStatus::parse(black_box(status)).describe(&names));
        });
    }

    group.finish();
}

fn reference_number_benchmark(c: &mut Criterion) {
    let at = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
    c.bench_function("reference_number", |b| {
        b.iter(|| reference_number(black_box(ReferencePrefix::Transfer), at, black_box(42)));
    });
}

fn item_draft_benchmark(c: &mut Criterion) {
    let now = Utc::now();
    let item = item::Model {
        id: 1,
        code: "M090".to_string(),
        name: "Gas Argon".to_string(),
        brand: "Samator".to_string(),
        category: "Gas Industri".to_string(),
        unit: "tabung".to_string(),
        quantity: 5,
        price: dec!(750000),
        status: "active".to_string(),
        supplier: String::new(),
        location: String::new(),
        entry_date: None,
        description: String::new(),
        warehouse_id: Some(1),
        created_at: now,
        updated_at: now,
    };

    c.bench_function("item_event_draft", |b| {
        b.iter(|| {
            item_event_draft(
                black_box(&item),
                ItemAction::Add,
                7,
                "IDR",
                Stamp::next(ReferencePrefix::Item),
            )
            .unwrap()
        });
    });
}

criterion_group!(
    benches,
    transfer_description_benchmark,
    reference_number_benchmark,
    item_draft_benchmark
);
criterion_main!(benches);
