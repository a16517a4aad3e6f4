use crate::{
    db::DbPool,
    errors::ServiceError,
    models::account::{self, AccountType},
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AccountInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub number: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[validate(length(equal = 3))]
    #[serde(default = "default_account_currency")]
    pub currency: String,
    #[serde(default)]
    pub balance: Decimal,
    pub enabled: Option<bool>,
    pub company_id: Option<i32>,
}

fn default_account_currency() -> String {
    "USD".to_string()
}

impl AccountInput {
    fn apply(self, model: &mut account::ActiveModel) {
        model.name = Set(self.name);
        model.number = Set(self.number);
        model.account_type = Set(self.account_type);
        model.currency = Set(self.currency.to_uppercase());
        model.balance = Set(self.balance);
        model.enabled = Set(self.enabled.unwrap_or(true));
        model.company_id = Set(self.company_id);
    }
}

#[derive(Clone)]
pub struct AccountService {
    db_pool: Arc<DbPool>,
}

impl AccountService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<account::Model>, ServiceError> {
        Ok(account::Entity::find()
            .order_by_asc(account::Column::Id)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<account::Model, ServiceError> {
        account::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("Account"))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: AccountInput) -> Result<account::Model, ServiceError> {
        input.validate()?;
        let mut model = <account::ActiveModel as std::default::Default>::default();
        input.apply(&mut model);
        let created = model.insert(&*self.db_pool).await?;
        info!(account_id = created.id, "account created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: AccountInput) -> Result<account::Model, ServiceError> {
        input.validate()?;
        let mut model: account::ActiveModel = self.get(id).await?.into();
        input.apply(&mut model);
        Ok(model.update(&*self.db_pool).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = account::Entity::delete_by_id(id)
            .exec(&*self.db_pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("Account"));
        }
        Ok(())
    }
}
