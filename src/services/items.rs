use crate::{
    db::DbPool,
    errors::ServiceError,
    models::item,
    services::history::{HistoryOutcome, HistoryService, ItemAction, Recorded},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

/// Largest price the `decimal(20, 2)` column holds.
pub const MAX_PRICE: Decimal = dec!(999999999999999999.99);

/// Body for creating or replacing an item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ItemInput {
    #[validate(length(min = 1, max = 64))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub unit: String,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub price: Decimal,
    pub status: Option<String>,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub location: String,
    pub entry_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    pub warehouse_id: Option<i32>,
}

impl ItemInput {
    fn check_price(&self) -> Result<(), ServiceError> {
        if self.price.is_sign_negative() {
            return Err(ServiceError::ValidationError(
                "Price must not be negative".to_string(),
            ));
        }
        if self.price > MAX_PRICE {
            return Err(ServiceError::ValidationError(format!(
                "Price must not exceed {}",
                MAX_PRICE
            )));
        }
        Ok(())
    }

    fn apply(self, model: &mut item::ActiveModel) {
        model.code = Set(self.code);
        model.name = Set(self.name);
        model.brand = Set(self.brand);
        model.category = Set(self.category);
        model.unit = Set(self.unit);
        model.quantity = Set(self.quantity);
        model.price = Set(self.price);
        model.status = Set(self.status.unwrap_or_else(|| "active".to_string()));
        model.supplier = Set(self.supplier);
        model.location = Set(self.location);
        model.entry_date = Set(self.entry_date);
        model.description = Set(self.description);
        model.warehouse_id = Set(self.warehouse_id);
    }
}

/// Stock items. Every stock-changing write is followed by a history row.
#[derive(Clone)]
pub struct ItemService {
    db_pool: Arc<DbPool>,
    history: HistoryService,
}

impl ItemService {
    pub fn new(db_pool: Arc<DbPool>, history: HistoryService) -> Self {
        Self { db_pool, history }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<item::Model>, ServiceError> {
        Ok(item::Entity::find()
            .order_by_asc(item::Column::Id)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<item::Model, ServiceError> {
        item::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("Item"))
    }

    #[instrument(skip(self, input), fields(code = %input.code))]
    pub async fn create(
        &self,
        input: ItemInput,
        user_id: i32,
    ) -> Result<Recorded<item::Model>, ServiceError> {
        input.validate()?;
        input.check_price()?;

        let mut model = <item::ActiveModel as std::default::Default>::default();
        input.apply(&mut model);
        let created = model.insert(&*self.db_pool).await?;
        info!(item_id = created.id, "item created");

        let history = self
            .history
            .record_item_event(&created, ItemAction::Add, user_id)
            .await
            .into();
        Ok(Recorded {
            entity: created,
            history,
        })
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: ItemInput,
        user_id: i32,
    ) -> Result<Recorded<item::Model>, ServiceError> {
        input.validate()?;
        input.check_price()?;

        let existing = self.get(id).await?;
        let mut model: item::ActiveModel = existing.into();
        input.apply(&mut model);
        let updated = model.update(&*self.db_pool).await?;
        info!(item_id = updated.id, "item updated");

        let history = self
            .history
            .record_item_event(&updated, ItemAction::Update, user_id)
            .await
            .into();
        Ok(Recorded {
            entity: updated,
            history,
        })
    }

    /// Takes `amount` units out of stock and records the reduction.
    #[instrument(skip(self, reason))]
    pub async fn reduce_stock(
        &self,
        id: i32,
        amount: i32,
        reason: &str,
        user_id: i32,
    ) -> Result<Recorded<item::Model>, ServiceError> {
        if amount <= 0 {
            return Err(ServiceError::ValidationError(
                "Reduction amount must be positive".to_string(),
            ));
        }

        let existing = self.get(id).await?;
        if amount > existing.quantity {
            return Err(ServiceError::InsufficientStock(format!(
                "requested {} but only {} on hand",
                amount, existing.quantity
            )));
        }

        let remaining = existing.quantity - amount;
        let mut model: item::ActiveModel = existing.into();
        model.quantity = Set(remaining);
        let updated = model.update(&*self.db_pool).await?;
        info!(item_id = updated.id, amount, remaining, "stock reduced");

        let history: HistoryOutcome = self
            .history
            .record_stock_reduction(&updated, amount, reason, user_id)
            .await
            .into();
        Ok(Recorded {
            entity: updated,
            history,
        })
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = item::Entity::delete_by_id(id)
            .exec(&*self.db_pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("Item"));
        }
        info!(item_id = id, "item deleted");
        Ok(())
    }

    /// Deletes every listed item and returns how many rows went away.
    #[instrument(skip(self))]
    pub async fn delete_many(&self, ids: Vec<i32>) -> Result<u64, ServiceError> {
        if ids.is_empty() {
            return Err(ServiceError::ValidationError(
                "No item ids provided".to_string(),
            ));
        }
        let result = item::Entity::delete_many()
            .filter(item::Column::Id.is_in(ids))
            .exec(&*self.db_pool)
            .await?;
        info!(deleted = result.rows_affected, "items deleted");
        Ok(result.rows_affected)
    }
}
