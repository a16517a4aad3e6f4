//! Stock history recorder.
//!
//! Every stock change on an item and every status change on a transfer order
//! is mirrored into one append-only row of the `transactions` table. Record
//! construction is split into pure builders ([`item_event_draft`],
//! [`stock_reduction_draft`], [`transfer_event_draft`]) and the
//! [`HistoryService`] which resolves names, stamps and persists them.

use crate::{
    db::DbPool,
    errors::ServiceError,
    models::{item, transaction, transfer_order, user, warehouse, TransactionKind},
};
use chrono::{DateTime, Utc};
use metrics::counter;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Select, Set,
};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use strum::{Display, EnumString};
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;

pub const UNKNOWN_ITEM: &str = "Unknown Item";
pub const UNKNOWN_WAREHOUSE: &str = "Unknown Warehouse";

const COMPLETED_STATUS: &str = "completed";
const SEQUENCE_MODULUS: u32 = 10_000;

static REFERENCE_SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// Item mutation being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ItemAction {
    Add,
    Update,
}

/// Reference-number prefix per event family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ReferencePrefix {
    #[strum(serialize = "ITEM")]
    Item,
    #[strum(serialize = "TRF")]
    Transfer,
    #[strum(serialize = "RED")]
    Reduction,
}

/// Transfer order status as seen by the recorder.
///
/// Statuses outside the four known ones are kept verbatim in `Other` and
/// rendered with the generic template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferStatus {
    Pending,
    Approved,
    InTransit,
    Completed,
    Other(String),
}

impl TransferStatus {
    pub fn parse(status: &str) -> Self {
        match status {
            "pending" => TransferStatus::Pending,
            "approved" => TransferStatus::Approved,
            "in_transit" => TransferStatus::InTransit,
            "completed" => TransferStatus::Completed,
            other => TransferStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TransferStatus::Pending => "pending",
            TransferStatus::Approved => "approved",
            TransferStatus::InTransit => "in_transit",
            TransferStatus::Completed => "completed",
            TransferStatus::Other(status) => status,
        }
    }

    /// Renders the history description for a transfer in this status.
    pub fn describe(&self, names: &TransferNames) -> String {
        let verb = match self {
            TransferStatus::Pending => "initiated",
            TransferStatus::Approved => "approved",
            TransferStatus::InTransit => "in transit",
            TransferStatus::Completed => "completed",
            TransferStatus::Other(status) => {
                return format!("Transfer {}: {}", status, names.item);
            }
        };
        format!(
            "Transfer {}: {} from {} to {}",
            verb, names.item, names.from_warehouse, names.to_warehouse
        )
    }
}

/// Display names resolved for a transfer description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferNames {
    pub item: String,
    pub from_warehouse: String,
    pub to_warehouse: String,
}

/// Reference number and clock reading shared by one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    pub number: String,
    pub at: DateTime<Utc>,
}

impl Stamp {
    /// Takes the current time and the next process-wide sequence value.
    pub fn next(prefix: ReferencePrefix) -> Self {
        let at = Utc::now();
        let sequence = REFERENCE_SEQUENCE.fetch_add(1, Ordering::Relaxed) % SEQUENCE_MODULUS;
        Self {
            number: reference_number(prefix, at, sequence),
            at,
        }
    }
}

/// Formats `<PREFIX>-<YYYYMMDDHHMMSS>-<NNNN>`.
pub fn reference_number(prefix: ReferencePrefix, at: DateTime<Utc>, sequence: u32) -> String {
    format!(
        "{}-{}-{:04}",
        prefix,
        at.format("%Y%m%d%H%M%S"),
        sequence % SEQUENCE_MODULUS
    )
}

/// A history row that has been built but not yet written.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryDraft {
    pub number: String,
    pub kind: TransactionKind,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
    pub date: DateTime<Utc>,
    pub reference: String,
    pub item_id: i32,
    pub warehouse_id: i32,
    pub user_id: i32,
    pub quantity: i32,
    pub status: String,
}

impl HistoryDraft {
    fn into_active_model(self) -> transaction::ActiveModel {
        transaction::ActiveModel {
            number: Set(self.number),
            kind: Set(self.kind),
            description: Set(self.description),
            amount: Set(self.amount),
            currency: Set(self.currency),
            date: Set(self.date),
            reference: Set(self.reference),
            item_id: Set(self.item_id),
            warehouse_id: Set(self.warehouse_id),
            user_id: Set(self.user_id),
            quantity: Set(self.quantity),
            status: Set(self.status),
            company_id: Set(None),
            account_id: Set(None),
            category_id: Set(None),
            created_at: Set(self.date),
            ..Default::default()
        }
    }
}

/// Stock-in record for an item that was added or updated.
///
/// Quantity is the stock on hand after the change, not a delta.
pub fn item_event_draft(
    item: &item::Model,
    action: ItemAction,
    user_id: i32,
    currency: &str,
    stamp: Stamp,
) -> Result<HistoryDraft, ServiceError> {
    let amount = item
        .stock_value()
        .ok_or_else(|| amount_overflow(item.quantity, item))?;
    Ok(HistoryDraft {
        number: stamp.number,
        kind: TransactionKind::StockIn,
        description: format!("{} item: {}", action, item.name),
        amount,
        currency: currency.to_string(),
        date: stamp.at,
        reference: item.code.clone(),
        item_id: item.id,
        warehouse_id: item.warehouse_id.unwrap_or(0),
        user_id,
        quantity: item.quantity,
        status: COMPLETED_STATUS.to_string(),
    })
}

/// Stock-out record. The amount is taken as given, with no range check.
pub fn stock_reduction_draft(
    item: &item::Model,
    reduction: i32,
    reason: &str,
    user_id: i32,
    currency: &str,
    stamp: Stamp,
) -> Result<HistoryDraft, ServiceError> {
    let amount = Decimal::from(reduction)
        .checked_mul(item.price)
        .ok_or_else(|| amount_overflow(reduction, item))?;
    Ok(HistoryDraft {
        number: stamp.number,
        kind: TransactionKind::StockOut,
        description: format!(
            "Stock reduction: {} - {} units - Reason: {}",
            item.name, reduction, reason
        ),
        amount,
        currency: currency.to_string(),
        date: stamp.at,
        reference: item.code.clone(),
        item_id: item.id,
        warehouse_id: item.warehouse_id.unwrap_or(0),
        user_id,
        quantity: reduction.saturating_neg(),
        status: COMPLETED_STATUS.to_string(),
    })
}

fn amount_overflow(quantity: i32, item: &item::Model) -> ServiceError {
    warn!(item_id = item.id, quantity, price = %item.price, "history amount overflowed");
    ServiceError::InternalError(format!(
        "amount overflow: {} x {} for item {}",
        quantity, item.price, item.id
    ))
}

/// Transfer record, described from the transfer's current status.
pub fn transfer_event_draft(
    transfer: &transfer_order::Model,
    names: &TransferNames,
    user_id: i32,
    currency: &str,
    stamp: Stamp,
) -> HistoryDraft {
    let status = TransferStatus::parse(&transfer.status);
    HistoryDraft {
        number: stamp.number,
        kind: TransactionKind::Transfer,
        description: status.describe(names),
        amount: Decimal::ZERO,
        currency: currency.to_string(),
        date: stamp.at,
        reference: transfer.code.clone(),
        item_id: transfer.item_id,
        warehouse_id: transfer.from_warehouse_id,
        user_id,
        quantity: transfer.quantity,
        status: transfer.status.clone(),
    }
}

/// Result of the history write that follows a primary mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryOutcome {
    Recorded(transaction::Model),
    Failed { error: String },
}

impl HistoryOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, HistoryOutcome::Recorded(_))
    }

    pub fn record(&self) -> Option<&transaction::Model> {
        match self {
            HistoryOutcome::Recorded(record) => Some(record),
            HistoryOutcome::Failed { .. } => None,
        }
    }
}

impl From<Result<transaction::Model, ServiceError>> for HistoryOutcome {
    fn from(result: Result<transaction::Model, ServiceError>) -> Self {
        match result {
            Ok(record) => HistoryOutcome::Recorded(record),
            Err(err) => HistoryOutcome::Failed {
                error: err.to_string(),
            },
        }
    }
}

/// A primary entity write together with the outcome of its history write.
#[derive(Debug, Clone)]
pub struct Recorded<T> {
    pub entity: T,
    pub history: HistoryOutcome,
}

/// History row with the item, warehouse and user it points at, when they
/// still exist.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub record: transaction::Model,
    pub item: Option<item::Model>,
    pub warehouse: Option<warehouse::Model>,
    pub user: Option<user::Model>,
}

#[derive(Clone)]
pub struct HistoryService {
    db_pool: Arc<DbPool>,
    currency: String,
}

impl HistoryService {
    pub fn new(db_pool: Arc<DbPool>, currency: impl Into<String>) -> Self {
        Self {
            db_pool,
            currency: currency.into(),
        }
    }

    /// Records an item add or update as a stock-in row.
    #[instrument(skip(self, item), fields(item_id = item.id))]
    pub async fn record_item_event(
        &self,
        item: &item::Model,
        action: ItemAction,
        user_id: i32,
    ) -> Result<transaction::Model, ServiceError> {
        let draft = item_event_draft(
            item,
            action,
            user_id,
            &self.currency,
            Stamp::next(ReferencePrefix::Item),
        )?;
        self.insert(draft).await
    }

    /// Records a stock reduction as a stock-out row.
    #[instrument(skip(self, item, reason), fields(item_id = item.id))]
    pub async fn record_stock_reduction(
        &self,
        item: &item::Model,
        reduction: i32,
        reason: &str,
        user_id: i32,
    ) -> Result<transaction::Model, ServiceError> {
        let draft = stock_reduction_draft(
            item,
            reduction,
            reason,
            user_id,
            &self.currency,
            Stamp::next(ReferencePrefix::Reduction),
        )?;
        self.insert(draft).await
    }

    /// Records a transfer event. `action` is only traced; the description
    /// follows the transfer's status.
    #[instrument(skip(self, transfer), fields(transfer_id = transfer.id))]
    pub async fn record_transfer_event(
        &self,
        transfer: &transfer_order::Model,
        action: &str,
        user_id: i32,
    ) -> Result<transaction::Model, ServiceError> {
        let names = TransferNames {
            item: self.item_name(transfer.item_id).await,
            from_warehouse: self.warehouse_name(transfer.from_warehouse_id).await,
            to_warehouse: self.warehouse_name(transfer.to_warehouse_id).await,
        };
        let draft = transfer_event_draft(
            transfer,
            &names,
            user_id,
            &self.currency,
            Stamp::next(ReferencePrefix::Transfer),
        );
        self.insert(draft).await
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<HistoryEntry>, ServiceError> {
        self.list(transaction::Entity::find()).await
    }

    #[instrument(skip(self))]
    pub async fn list_by_item(&self, item_id: i32) -> Result<Vec<HistoryEntry>, ServiceError> {
        self.list(transaction::Entity::find().filter(transaction::Column::ItemId.eq(item_id)))
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_by_warehouse(
        &self,
        warehouse_id: i32,
    ) -> Result<Vec<HistoryEntry>, ServiceError> {
        self.list(
            transaction::Entity::find().filter(transaction::Column::WarehouseId.eq(warehouse_id)),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<HistoryEntry, ServiceError> {
        let record = transaction::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("History"))?;

        let mut entries = self.hydrate(vec![record]).await?;
        entries
            .pop()
            .ok_or_else(|| ServiceError::not_found("History"))
    }

    /// Deletes one row. A missing id is reported as not found.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = transaction::Entity::delete_by_id(id)
            .exec(&*self.db_pool)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("History"));
        }

        info!(history_id = id, "history record deleted");
        Ok(())
    }

    async fn insert(&self, draft: HistoryDraft) -> Result<transaction::Model, ServiceError> {
        let kind = draft.kind.as_str();
        match draft.into_active_model().insert(&*self.db_pool).await {
            Ok(record) => {
                counter!("stockroom_history.recorded", 1, "kind" => kind);
                debug!(history_id = record.id, number = %record.number, "history recorded");
                Ok(record)
            }
            Err(err) => {
                counter!("stockroom_history.failed", 1, "kind" => kind);
                warn!(error = %err, kind, "history write failed");
                Err(ServiceError::DatabaseError(err))
            }
        }
    }

    async fn list(
        &self,
        query: Select<transaction::Entity>,
    ) -> Result<Vec<HistoryEntry>, ServiceError> {
        let records = query
            .order_by_desc(transaction::Column::CreatedAt)
            .order_by_desc(transaction::Column::Id)
            .all(&*self.db_pool)
            .await?;
        self.hydrate(records).await
    }

    /// Attaches items, warehouses and users with one query per table.
    async fn hydrate(
        &self,
        records: Vec<transaction::Model>,
    ) -> Result<Vec<HistoryEntry>, ServiceError> {
        let db = &*self.db_pool;

        let item_ids = referenced_ids(&records, |r| r.item_id);
        let warehouse_ids = referenced_ids(&records, |r| r.warehouse_id);
        let user_ids = referenced_ids(&records, |r| r.user_id);

        let items: HashMap<i32, item::Model> = if item_ids.is_empty() {
            HashMap::new()
        } else {
            item::Entity::find()
                .filter(item::Column::Id.is_in(item_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|m| (m.id, m))
                .collect()
        };

        let warehouses: HashMap<i32, warehouse::Model> = if warehouse_ids.is_empty() {
            HashMap::new()
        } else {
            warehouse::Entity::find()
                .filter(warehouse::Column::Id.is_in(warehouse_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|m| (m.id, m))
                .collect()
        };

        let users: HashMap<i32, user::Model> = if user_ids.is_empty() {
            HashMap::new()
        } else {
            user::Entity::find()
                .filter(user::Column::Id.is_in(user_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|m| (m.id, m))
                .collect()
        };

        Ok(records
            .into_iter()
            .map(|record| HistoryEntry {
                item: items.get(&record.item_id).cloned(),
                warehouse: warehouses.get(&record.warehouse_id).cloned(),
                user: users.get(&record.user_id).cloned(),
                record,
            })
            .collect())
    }

    async fn item_name(&self, id: i32) -> String {
        match item::Entity::find_by_id(id).one(&*self.db_pool).await {
            Ok(Some(found)) => found.name,
            Ok(None) => UNKNOWN_ITEM.to_string(),
            Err(err) => {
                warn!(item_id = id, error = %err, "item lookup failed");
                UNKNOWN_ITEM.to_string()
            }
        }
    }

    async fn warehouse_name(&self, id: i32) -> String {
        match warehouse::Entity::find_by_id(id).one(&*self.db_pool).await {
            Ok(Some(found)) => found.name,
            Ok(None) => UNKNOWN_WAREHOUSE.to_string(),
            Err(err) => {
                warn!(warehouse_id = id, error = %err, "warehouse lookup failed");
                UNKNOWN_WAREHOUSE.to_string()
            }
        }
    }
}

fn referenced_ids<F>(records: &[transaction::Model], pick: F) -> Vec<i32>
where
    F: Fn(&transaction::Model) -> i32,
{
    records
        .iter()
        .map(pick)
        .filter(|id| *id != 0)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{establish_connection_with_config, run_migrations, DbConfig};
    use assert_matches::assert_matches;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn gas_argon() -> item::Model {
        let now = Utc::now();
        item::Model {
            id: 1,
            code: "M090".into(),
            name: "Gas Argon".into(),
            brand: "Gas".into(),
            category: "Industrial Gas".into(),
            unit: "Tube".into(),
            quantity: 5,
            price: dec!(750000),
            status: "active".into(),
            supplier: "PT Gas Indonesia".into(),
            location: "Gudang A".into(),
            entry_date: None,
            description: String::new(),
            warehouse_id: Some(1),
            created_at: now,
            updated_at: now,
        }
    }

    fn transfer(status: &str) -> transfer_order::Model {
        let now = Utc::now();
        transfer_order::Model {
            id: 9,
            code: "TR009".into(),
            item_id: 1,
            from_warehouse_id: 1,
            to_warehouse_id: 2,
            quantity: 3,
            status: status.into(),
            transfer_date: None,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn names() -> TransferNames {
        TransferNames {
            item: "Gas Argon".into(),
            from_warehouse: "Gudang Utama".into(),
            to_warehouse: "Gudang Cabang".into(),
        }
    }

    fn stamp() -> Stamp {
        Stamp {
            number: "TEST-0".into(),
            at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 15).unwrap(),
        }
    }

    #[test]
    fn add_event_matches_gas_argon_scenario() {
        let draft = item_event_draft(&gas_argon(), ItemAction::Add, 7, "IDR", stamp()).unwrap();
        assert_eq!(draft.kind, TransactionKind::StockIn);
        assert_eq!(draft.quantity, 5);
        assert_eq!(draft.amount, dec!(3750000));
        assert_eq!(draft.reference, "M090");
        assert_eq!(draft.description, "add item: Gas Argon");
        assert_eq!(draft.user_id, 7);
        assert_eq!(draft.warehouse_id, 1);
        assert_eq!(draft.status, "completed");
    }

    #[test]
    fn reduction_matches_damaged_scenario() {
        let draft = stock_reduction_draft(&gas_argon(), 2, "damaged", 7, "IDR", stamp()).unwrap();
        assert_eq!(draft.kind, TransactionKind::StockOut);
        assert_eq!(draft.quantity, -2);
        assert_eq!(draft.amount, dec!(1500000));
        assert!(draft.description.contains("2 units"));
        assert!(draft.description.contains("damaged"));
    }

    #[test]
    fn unassigned_item_records_warehouse_zero() {
        let mut item = gas_argon();
        item.warehouse_id = None;
        let draft = item_event_draft(&item, ItemAction::Update, 0, "IDR", stamp()).unwrap();
        assert_eq!(draft.warehouse_id, 0);
        assert_eq!(draft.description, "update item: Gas Argon");
    }

    #[rstest]
    #[case("pending", "Transfer initiated: Gas Argon from Gudang Utama to Gudang Cabang")]
    #[case("approved", "Transfer approved: Gas Argon from Gudang Utama to Gudang Cabang")]
    #[case("in_transit", "Transfer in transit: Gas Argon from Gudang Utama to Gudang Cabang")]
    #[case("completed", "Transfer completed: Gas Argon from Gudang Utama to Gudang Cabang")]
    #[case("cancelled", "Transfer cancelled: Gas Argon")]
    #[case("", "Transfer : Gas Argon")]
    fn transfer_description_follows_status(#[case] status: &str, #[case] expected: &str) {
        let draft = transfer_event_draft(&transfer(status), &names(), 7, "IDR", stamp());
        assert_eq!(draft.description, expected);
        assert_eq!(draft.kind, TransactionKind::Transfer);
        assert_eq!(draft.amount, Decimal::ZERO);
        assert_eq!(draft.quantity, 3);
        assert_eq!(draft.warehouse_id, 1);
        assert_eq!(draft.status, status);
        assert_eq!(draft.reference, "TR009");
    }

    #[test]
    fn unknown_status_is_an_explicit_variant() {
        assert_eq!(
            TransferStatus::parse("on_hold"),
            TransferStatus::Other("on_hold".into())
        );
        assert_eq!(TransferStatus::parse("in_transit"), TransferStatus::InTransit);
        assert_eq!(TransferStatus::parse("on_hold").as_str(), "on_hold");
    }

    #[test]
    fn item_action_parses_lowercase_only_known_values() {
        assert_eq!(ItemAction::from_str("add").unwrap(), ItemAction::Add);
        assert_eq!(ItemAction::from_str("update").unwrap(), ItemAction::Update);
        assert!(ItemAction::from_str("reduce").is_err());
        assert_eq!(ItemAction::Update.to_string(), "update");
    }

    #[test]
    fn reference_number_shape() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 15).unwrap();
        assert_eq!(
            reference_number(ReferencePrefix::Reduction, at, 42),
            "RED-20240301083015-0042"
        );
        assert_eq!(
            reference_number(ReferencePrefix::Item, at, 10_003),
            "ITEM-20240301083015-0003"
        );
    }

    #[test]
    fn stamps_within_one_second_differ() {
        let a = Stamp::next(ReferencePrefix::Transfer);
        let b = Stamp::next(ReferencePrefix::Transfer);
        assert_ne!(a.number, b.number);
        assert!(a.number.starts_with("TRF-"));
    }

    #[test]
    fn outcome_from_result() {
        let failed: HistoryOutcome =
            Err(ServiceError::DatabaseError(sea_orm::DbErr::Custom("locked".into()))).into();
        assert_matches!(failed, HistoryOutcome::Failed { ref error } if error.contains("locked"));
        assert!(failed.record().is_none());
    }

    #[test]
    fn oversized_amounts_are_errors_not_panics() {
        let mut item = gas_argon();
        item.quantity = 2_000_000_000;
        item.price = Decimal::from_str("70000000000000000000").unwrap();
        assert_matches!(
            item_event_draft(&item, ItemAction::Add, 1, "IDR", stamp()),
            Err(ServiceError::InternalError(msg)) if msg.contains("overflow")
        );
        assert_matches!(
            stock_reduction_draft(&item, i32::MIN, "audit", 1, "IDR", stamp()),
            Err(ServiceError::InternalError(_))
        );
        assert!(item.stock_value().is_none());
    }

    proptest! {
        #[test]
        fn item_event_copies_stock(quantity in 0i32..100_000, cents in 0i64..100_000_000) {
            let mut item = gas_argon();
            item.quantity = quantity;
            item.price = Decimal::new(cents, 2);
            let draft = item_event_draft(&item, ItemAction::Add, 1, "IDR", stamp()).unwrap();
            prop_assert_eq!(draft.quantity, quantity);
            prop_assert_eq!(draft.amount, Decimal::from(quantity) * item.price);
        }

        #[test]
        fn reduction_negates_any_amount(reduction in -100_000i32..100_000, cents in 0i64..100_000_000) {
            let mut item = gas_argon();
            item.price = Decimal::new(cents, 2);
            let draft = stock_reduction_draft(&item, reduction, "audit", 1, "IDR", stamp()).unwrap();
            prop_assert_eq!(draft.quantity, -reduction);
            prop_assert_eq!(draft.amount, Decimal::from(reduction) * item.price);
        }

        #[test]
        fn other_statuses_still_name_the_item(status in "[a-z_]{1,16}") {
            prop_assume!(!["pending", "approved", "in_transit", "completed"].contains(&status.as_str()));
            let draft = transfer_event_draft(&transfer(&status), &names(), 1, "IDR", stamp());
            prop_assert!(draft.description.contains("Gas Argon"));
            let expected_prefix = format!("Transfer {}:", status);
            prop_assert!(draft.description.starts_with(&expected_prefix));
        }
    }

    async fn service() -> HistoryService {
        let pool = establish_connection_with_config(&DbConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..Default::default()
        })
        .await
        .expect("in-memory sqlite");
        run_migrations(&pool).await.expect("migrations");
        HistoryService::new(Arc::new(pool), "IDR")
    }

    #[tokio::test]
    async fn unresolvable_transfer_names_use_placeholders() {
        let svc = service().await;
        let record = svc
            .record_transfer_event(&transfer("completed"), "update", 0)
            .await
            .expect("recorded");
        assert_eq!(
            record.description,
            "Transfer completed: Unknown Item from Unknown Warehouse to Unknown Warehouse"
        );
        assert_eq!(record.currency, "IDR");
    }

    #[tokio::test]
    async fn list_filters_and_orders_newest_first() {
        let svc = service().await;
        let argon = gas_argon();
        let mut other = gas_argon();
        other.id = 2;
        other.warehouse_id = Some(2);

        let first = svc.record_item_event(&argon, ItemAction::Add, 0).await.unwrap();
        let second = svc.record_item_event(&other, ItemAction::Add, 0).await.unwrap();
        let third = svc
            .record_stock_reduction(&argon, 1, "sample", 0)
            .await
            .unwrap();

        let all = svc.list_all().await.unwrap();
        let ids: Vec<i32> = all.iter().map(|e| e.record.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
        assert!(all
            .windows(2)
            .all(|w| w[0].record.created_at >= w[1].record.created_at));

        let by_item = svc.list_by_item(1).await.unwrap();
        assert_eq!(by_item.len(), 2);
        assert!(by_item.iter().all(|e| e.record.item_id == 1));

        let by_warehouse = svc.list_by_warehouse(2).await.unwrap();
        assert_eq!(by_warehouse.len(), 1);
        assert_eq!(by_warehouse[0].record.id, second.id);
    }

    #[tokio::test]
    async fn overflowing_item_event_writes_nothing() {
        let svc = service().await;
        let mut item = gas_argon();
        item.quantity = 2_000_000_000;
        item.price = Decimal::from_str("70000000000000000000").unwrap();

        let outcome: HistoryOutcome = svc.record_item_event(&item, ItemAction::Add, 0).await.into();
        assert_matches!(outcome, HistoryOutcome::Failed { ref error } if error.contains("overflow"));
        assert!(svc.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let svc = service().await;
        let argon = gas_argon();
        let keep = svc.record_item_event(&argon, ItemAction::Add, 0).await.unwrap();
        let drop = svc.record_item_event(&argon, ItemAction::Update, 0).await.unwrap();

        svc.delete(drop.id).await.unwrap();

        let remaining: Vec<i32> = svc
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.record.id)
            .collect();
        assert_eq!(remaining, vec![keep.id]);

        assert_matches!(svc.delete(drop.id).await, Err(ServiceError::NotFound(msg)) if msg == "History not found");
        assert_matches!(svc.get(drop.id).await, Err(ServiceError::NotFound(_)));
    }
}
