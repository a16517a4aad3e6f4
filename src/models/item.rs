use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stock-keeping unit held in a warehouse.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "items")]
#[schema(as = Item)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub code: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub unit: String,
    pub quantity: i32,
    #[sea_orm(column_type = "Decimal(Some((20, 2)))")]
    pub price: Decimal,
    pub status: String,
    pub supplier: String,
    pub location: String,
    pub entry_date: Option<NaiveDate>,
    pub description: String,
    pub warehouse_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Model {
    /// Stock value at the current unit price; `None` when it overflows.
    pub fn stock_value(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.price)
    }
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
        active_model.updated_at = Set(now);
        Ok(active_model)
    }
}
