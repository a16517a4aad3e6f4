use crate::{db::DbPool, errors::ServiceError, models::warehouse};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct WarehouseInput {
    #[validate(length(min = 1, max = 64))]
    pub code: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub capacity: i32,
    pub status: Option<String>,
}

impl WarehouseInput {
    fn apply(self, model: &mut warehouse::ActiveModel) {
        model.code = Set(self.code);
        model.name = Set(self.name);
        model.address = Set(self.address);
        model.city = Set(self.city);
        model.province = Set(self.province);
        model.capacity = Set(self.capacity);
        model.status = Set(self.status.unwrap_or_else(|| "active".to_string()));
    }
}

#[derive(Clone)]
pub struct WarehouseService {
    db_pool: Arc<DbPool>,
}

impl WarehouseService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<warehouse::Model>, ServiceError> {
        Ok(warehouse::Entity::find()
            .order_by_asc(warehouse::Column::Id)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<warehouse::Model, ServiceError> {
        warehouse::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("Warehouse"))
    }

    #[instrument(skip(self, input), fields(code = %input.code))]
    pub async fn create(&self, input: WarehouseInput) -> Result<warehouse::Model, ServiceError> {
        input.validate()?;
        let mut model = <warehouse::ActiveModel as std::default::Default>::default();
        input.apply(&mut model);
        let created = model.insert(&*self.db_pool).await?;
        info!(warehouse_id = created.id, "warehouse created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: WarehouseInput,
    ) -> Result<warehouse::Model, ServiceError> {
        input.validate()?;
        let mut model: warehouse::ActiveModel = self.get(id).await?.into();
        input.apply(&mut model);
        Ok(model.update(&*self.db_pool).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = warehouse::Entity::delete_by_id(id)
            .exec(&*self.db_pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("Warehouse"));
        }
        info!(warehouse_id = id, "warehouse deleted");
        Ok(())
    }
}
