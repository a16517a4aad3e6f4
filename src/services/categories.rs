use crate::{
    db::DbPool,
    errors::ServiceError,
    models::category::{self, CategoryType},
};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(rename = "type")]
    pub category_type: CategoryType,
    #[serde(default)]
    pub color: String,
    pub enabled: Option<bool>,
    pub company_id: Option<i32>,
}

#[derive(Clone)]
pub struct CategoryService {
    db_pool: Arc<DbPool>,
}

impl CategoryService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<category::Model>, ServiceError> {
        Ok(category::Entity::find()
            .order_by_asc(category::Column::Id)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<category::Model, ServiceError> {
        category::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("Category"))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CategoryInput) -> Result<category::Model, ServiceError> {
        input.validate()?;
        let model = category::ActiveModel {
            name: Set(input.name),
            category_type: Set(input.category_type),
            color: Set(input.color),
            enabled: Set(input.enabled.unwrap_or(true)),
            company_id: Set(input.company_id),
            ..Default::default()
        };
        Ok(model.insert(&*self.db_pool).await?)
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: CategoryInput,
    ) -> Result<category::Model, ServiceError> {
        input.validate()?;
        let mut model: category::ActiveModel = self.get(id).await?.into();
        model.name = Set(input.name);
        model.category_type = Set(input.category_type);
        model.color = Set(input.color);
        if let Some(enabled) = input.enabled {
            model.enabled = Set(enabled);
        }
        model.company_id = Set(input.company_id);
        Ok(model.update(&*self.db_pool).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = category::Entity::delete_by_id(id)
            .exec(&*self.db_pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("Category"));
        }
        Ok(())
    }
}
