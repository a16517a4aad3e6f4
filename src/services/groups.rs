use crate::{
    db::DbPool,
    errors::ServiceError,
    models::{group_item, item, item_group},
};
use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct GroupInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub status: Option<String>,
}

#[derive(Clone)]
pub struct GroupService {
    db_pool: Arc<DbPool>,
}

impl GroupService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<item_group::Model>, ServiceError> {
        Ok(item_group::Entity::find()
            .order_by_asc(item_group::Column::Id)
            .all(&*self.db_pool)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<item_group::Model, ServiceError> {
        item_group::Entity::find_by_id(id)
            .one(&*self.db_pool)
            .await?
            .ok_or_else(|| ServiceError::not_found("Group"))
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: GroupInput) -> Result<item_group::Model, ServiceError> {
        input.validate()?;
        let model = item_group::ActiveModel {
            name: Set(input.name),
            description: Set(input.description),
            category: Set(input.category),
            status: Set(input.status.unwrap_or_else(|| "active".to_string())),
            ..Default::default()
        };
        let created = model.insert(&*self.db_pool).await?;
        info!(group_id = created.id, "group created");
        Ok(created)
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: GroupInput,
    ) -> Result<item_group::Model, ServiceError> {
        input.validate()?;
        let mut model: item_group::ActiveModel = self.get(id).await?.into();
        model.name = Set(input.name);
        model.description = Set(input.description);
        model.category = Set(input.category);
        if let Some(status) = input.status {
            model.status = Set(status);
        }
        Ok(model.update(&*self.db_pool).await?)
    }

    /// Deletes a group and its memberships. Items are untouched.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        group_item::Entity::delete_many()
            .filter(group_item::Column::GroupId.eq(id))
            .exec(db)
            .await?;
        let result = item_group::Entity::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("Group"));
        }
        info!(group_id = id, "group deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn items(&self, group_id: i32) -> Result<Vec<item::Model>, ServiceError> {
        self.get(group_id).await?;
        Ok(item::Entity::find()
            .join_rev(JoinType::InnerJoin, group_item::Relation::Item.def())
            .filter(group_item::Column::GroupId.eq(group_id))
            .order_by_asc(item::Column::Id)
            .all(&*self.db_pool)
            .await?)
    }

    /// Adds an item to a group. Adding an existing member is a no-op.
    #[instrument(skip(self))]
    pub async fn add_item(&self, group_id: i32, item_id: i32) -> Result<(), ServiceError> {
        let db = &*self.db_pool;
        self.get(group_id).await?;
        if item::Entity::find_by_id(item_id).one(db).await?.is_none() {
            return Err(ServiceError::not_found("Item"));
        }

        let membership = group_item::ActiveModel {
            group_id: Set(group_id),
            item_id: Set(item_id),
            created_at: Set(Utc::now()),
        };
        group_item::Entity::insert(membership)
            .on_conflict(
                OnConflict::columns([group_item::Column::GroupId, group_item::Column::ItemId])
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(db)
            .await?;
        info!(group_id, item_id, "item added to group");
        Ok(())
    }
}
