use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of stock event a history record describes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    #[sea_orm(string_value = "stock_in")]
    StockIn,
    #[sea_orm(string_value = "stock_out")]
    StockOut,
    #[sea_orm(string_value = "transfer")]
    Transfer,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::StockIn => "stock_in",
            TransactionKind::StockOut => "stock_out",
            TransactionKind::Transfer => "transfer",
        }
    }
}

/// One row of the stock history log.
///
/// Rows are append-only: there is no update path, only insert and delete.
/// `item_id`, `warehouse_id` and `user_id` use `0` for "none" and are not
/// foreign keys, so a record may outlive the entities it mentions.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "transactions")]
#[schema(as = HistoryRecord)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub number: String,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((20, 2)))")]
    pub amount: Decimal,
    pub currency: String,
    pub date: DateTime<Utc>,
    pub reference: String,
    pub item_id: i32,
    pub warehouse_id: i32,
    pub user_id: i32,
    pub quantity: i32,
    pub status: String,
    pub company_id: Option<i32>,
    pub account_id: Option<i32>,
    pub category_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        let now = Utc::now();
        if insert && active_model.created_at.is_not_set() {
            active_model.created_at = Set(now);
        }
        if active_model.date.is_not_set() {
            active_model.date = Set(now);
        }
        active_model.updated_at = Set(now);
        Ok(active_model)
    }
}
