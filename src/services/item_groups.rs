use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::item_group::{self, Entity as ItemGroupEntity};
use crate::entities::AuditAction;
use crate::errors::ServiceError;
use crate::services::audit::{AuditSink, SYSTEM_ACTOR};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ItemGroupData {
    #[validate(length(min = 1, max = 100, message = "name must be 1..=100 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct ItemGroupService {
    db: Arc<DbPool>,
    audit: AuditSink,
}

impl ItemGroupService {
    pub fn new(db: Arc<DbPool>, audit: AuditSink) -> Self {
        Self { db, audit }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, limit: Option<u64>) -> Result<Vec<item_group::Model>, ServiceError> {
        let mut query = ItemGroupEntity::find().filter(item_group::Column::IsDeleted.eq(false));
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        Ok(query.all(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<item_group::Model>, ServiceError> {
        Ok(ItemGroupEntity::find()
            .filter(item_group::Column::IsDeleted.eq(false))
            .filter(item_group::Column::Id.eq(id))
            .one(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get_any(&self, id: i32) -> Result<Option<item_group::Model>, ServiceError> {
        Ok(ItemGroupEntity::find_by_id(id).one(&*self.db).await?)
    }

    #[instrument(skip(self, data))]
    pub async fn create(&self, data: ItemGroupData) -> Result<item_group::Model, ServiceError> {
        data.validate()?;
        let now = Utc::now();

        let model = item_group::ActiveModel {
            name: Set(data.name),
            description: Set(data.description),
            created_at: Set(now),
            updated_at: Set(now),
            is_deleted: Set(false),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        self.audit
            .record(
                SYSTEM_ACTOR,
                "ItemGroup",
                AuditAction::Create,
                "/api/v1/item-groups",
                format!("Created item group {}", model.id),
            )
            .await;
        Ok(model)
    }

    #[instrument(skip(self, data))]
    pub async fn update(
        &self,
        id: i32,
        data: ItemGroupData,
    ) -> Result<Option<item_group::Model>, ServiceError> {
        data.validate()?;

        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: item_group::ActiveModel = existing.into();
        active.name = Set(data.name);
        active.description = Set(data.description);
        active.updated_at = Set(Utc::now());

        let model = active.update(&*self.db).await?;
        self.audit
            .record(
                SYSTEM_ACTOR,
                "ItemGroup",
                AuditAction::Update,
                &format!("/api/v1/item-groups/{id}"),
                format!("Updated item group {id}"),
            )
            .await;
        Ok(Some(model))
    }

    #[instrument(skip(self))]
    pub async fn soft_delete(&self, id: i32) -> Result<bool, ServiceError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(false);
        };

        let mut active: item_group::ActiveModel = existing.into();
        active.is_deleted = Set(true);
        active.updated_at = Set(Utc::now());
        active.update(&*self.db).await?;

        self.audit
            .record(
                SYSTEM_ACTOR,
                "ItemGroup",
                AuditAction::Delete,
                &format!("/api/v1/item-groups/{id}"),
                format!("Soft deleted item group {id}"),
            )
            .await;
        Ok(true)
    }
}
