use crate::{
    db::DbPool,
    errors::ServiceError,
    models::{item, transfer_order, warehouse},
    services::history::{HistoryService, Recorded},
};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_COMPLETED: &str = "completed";

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TransferInput {
    #[validate(length(min = 1, max = 64))]
    pub code: String,
    pub item_id: i32,
    pub from_warehouse_id: i32,
    pub to_warehouse_id: i32,
    #[validate(range(min = 1))]
    pub quantity: i32,
    pub status: Option<String>,
    pub transfer_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

impl TransferInput {
    fn apply(self, model: &mut transfer_order::ActiveModel) {
        model.code = Set(self.code);
        model.item_id = Set(self.item_id);
        model.from_warehouse_id = Set(self.from_warehouse_id);
        model.to_warehouse_id = Set(self.to_warehouse_id);
        model.quantity = Set(self.quantity);
        model.status = Set(self.status.unwrap_or_else(|| STATUS_PENDING.to_string()));
        model.transfer_date = Set(self.transfer_date);
        model.notes = Set(self.notes);
    }
}

/// Transfer orders between warehouses. Creation and every status change
/// are recorded in the stock history.
#[derive(Clone)]
pub struct TransferService {
    db_pool: Arc<DbPool>,
    history: HistoryService,
}

impl TransferService {
    pub fn new(db_pool: Arc<DbPool>, history: HistoryService) -> Self {
        Self { db_pool, history }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<transfer_order::Model>, ServiceError> {
        Ok(transfer_order::Entity::find()
            .order_by_asc(transfer_order::Column::Id)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<transfer_order::Model, ServiceError> {
        transfer_order::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("Transfer"))
    }

    #[instrument(skip(self, input), fields(code = %input.code))]
    pub async fn create(
        &self,
        input: TransferInput,
        user_id: i32,
    ) -> Result<Recorded<transfer_order::Model>, ServiceError> {
        self.check_input(&input).await?;

        let mut model = <transfer_order::ActiveModel as std::default::Default>::default();
        input.apply(&mut model);
        let created = model.insert(&*self.db_pool).await?;
        info!(transfer_id = created.id, "transfer created");

        let history = self
            .history
            .record_transfer_event(&created, "create", user_id)
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
        input: TransferInput,
        user_id: i32,
    ) -> Result<Recorded<transfer_order::Model>, ServiceError> {
        self.check_input(&input).await?;

        let mut model: transfer_order::ActiveModel = self.get(id).await?.into();
        input.apply(&mut model);
        let updated = model.update(&*self.db_pool).await?;
        info!(transfer_id = updated.id, status = %updated.status, "transfer updated");

        let history = self
            .history
            .record_transfer_event(&updated, "update", user_id)
            .await
            .into();
        Ok(Recorded {
            entity: updated,
            history,
        })
    }

    pub async fn approve(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<Recorded<transfer_order::Model>, ServiceError> {
        self.set_status(id, STATUS_APPROVED, user_id).await
    }

    pub async fn complete(
        &self,
        id: i32,
        user_id: i32,
    ) -> Result<Recorded<transfer_order::Model>, ServiceError> {
        self.set_status(id, STATUS_COMPLETED, user_id).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = transfer_order::Entity::delete_by_id(id)
            .exec(&*self.db_pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("Transfer"));
        }
        info!(transfer_id = id, "transfer deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_status(
        &self,
        id: i32,
        status: &str,
        user_id: i32,
    ) -> Result<Recorded<transfer_order::Model>, ServiceError> {
        let mut model: transfer_order::ActiveModel = self.get(id).await?.into();
        model.status = Set(status.to_string());
        let updated = model.update(&*self.db_pool).await?;
        info!(transfer_id = id, status, "transfer status changed");

        let history = self
            .history
            .record_transfer_event(&updated, "status_change", user_id)
            .await
            .into();
        Ok(Recorded {
            entity: updated,
            history,
        })
    }

    async fn check_input(&self, input: &TransferInput) -> Result<(), ServiceError> {
        input.validate()?;
        if input.from_warehouse_id == input.to_warehouse_id {
            return Err(ServiceError::ValidationError(
                "Source and destination warehouses must differ".to_string(),
            ));
        }

        let db = &*self.db_pool;
        if item::Entity::find_by_id(input.item_id).one(db).await?.is_none() {
            return Err(ServiceError::not_found("Item"));
        }
        for warehouse_id in [input.from_warehouse_id, input.to_warehouse_id] {
            if warehouse::Entity::find_by_id(warehouse_id)
                .one(db)
                .await?
                .is_none()
            {
                return Err(ServiceError::not_found("Warehouse"));
            }
        }
        Ok(())
    }
}
