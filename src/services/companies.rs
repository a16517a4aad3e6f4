use crate::{db::DbPool, errors::ServiceError, models::company};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompanyInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub tax_number: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub logo: String,
    pub enabled: Option<bool>,
}

impl CompanyInput {
    fn apply(self, model: &mut company::ActiveModel) {
        model.name = Set(self.name);
        model.email = Set(self.email);
        model.phone = Set(self.phone);
        model.address = Set(self.address);
        model.city = Set(self.city);
        model.country = Set(self.country);
        model.postal_code = Set(self.postal_code);
        model.tax_number = Set(self.tax_number);
        model.website = Set(self.website);
        model.logo = Set(self.logo);
        model.enabled = Set(self.enabled.unwrap_or(true));
    }
}

#[derive(Clone)]
pub struct CompanyService {
    db_pool: Arc<DbPool>,
}

impl CompanyService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<company::Model>, ServiceError> {
        Ok(company::Entity::find()
            .order_by_asc(company::Column::Id)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<company::Model, ServiceError> {
        company::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("Company"))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CompanyInput) -> Result<company::Model, ServiceError> {
        input.validate()?;
        let mut model = <company::ActiveModel as std::default::Default>::default();
        input.apply(&mut model);
        let created = model.insert(&*self.db_pool).await?;
        info!(company_id = created.id, "company created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: CompanyInput) -> Result<company::Model, ServiceError> {
        input.validate()?;
        let mut model: company::ActiveModel = self.get(id).await?.into();
        input.apply(&mut model);
        Ok(model.update(&*self.db_pool).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = company::Entity::delete_by_id(id)
            .exec(&*self.db_pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("Company"));
        }
        Ok(())
    }
}
