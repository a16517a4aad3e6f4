use crate::{auth::hash_password, db::DbPool, errors::ServiceError, models::user};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

const DEFAULT_ROLE: &str = "user";

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewUser {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[serde(default)]
    pub phone: String,
    pub role: Option<String>,
    pub company_id: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UserUpdate {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
    pub phone: Option<String>,
    pub enabled: Option<bool>,
    pub role: Option<String>,
    pub company_id: Option<i32>,
}

#[derive(Clone)]
pub struct UserService {
    db_pool: Arc<DbPool>,
}

impl UserService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<user::Model>, ServiceError> {
        Ok(user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<user::Model, ServiceError> {
        user::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, ServiceError> {
        Ok(user::Entity::find()
            .filter(user::Column::Email.eq(email.trim().to_lowercase()))
            .one(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: NewUser) -> Result<user::Model, ServiceError> {
        input.validate()?;
        let email = input.email.trim().to_lowercase();
        if self.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::Conflict("Email already registered".to_string()));
        }

        let model = user::ActiveModel {
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            email: Set(email),
            password_hash: Set(hash_password(&input.password)?),
            phone: Set(input.phone),
            enabled: Set(true),
            role: Set(input.role.unwrap_or_else(|| DEFAULT_ROLE.to_string())),
            company_id: Set(input.company_id),
            ..Default::default()
        };
        let created = model.insert(&*self.db_pool).await?;
        info!(user_id = created.id, "user created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: UserUpdate) -> Result<user::Model, ServiceError> {
        input.validate()?;
        let existing = self.get(id).await?;

        if let Some(email) = input.email.as_deref() {
            let email = email.trim().to_lowercase();
            if let Some(other) = self.find_by_email(&email).await? {
                if other.id != existing.id {
                    return Err(ServiceError::Conflict("Email already registered".to_string()));
                }
            }
        }

        let mut model: user::ActiveModel = existing.into();
        if let Some(first_name) = input.first_name {
            model.first_name = Set(first_name);
        }
        if let Some(last_name) = input.last_name {
            model.last_name = Set(last_name);
        }
        if let Some(email) = input.email {
            model.email = Set(email.trim().to_lowercase());
        }
        if let Some(password) = input.password {
            model.password_hash = Set(hash_password(&password)?);
        }
        if let Some(phone) = input.phone {
            model.phone = Set(phone);
        }
        if let Some(enabled) = input.enabled {
            model.enabled = Set(enabled);
        }
        if let Some(role) = input.role {
            model.role = Set(role);
        }
        if input.company_id.is_some() {
            model.company_id = Set(input.company_id);
        }
        Ok(model.update(&*self.db_pool).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let result = user::Entity::delete_by_id(id)
            .exec(&*self.db_pool)
            .await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("User"));
        }
        info!(user_id = id, "user deleted");
        Ok(())
    }
}
