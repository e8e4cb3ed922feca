use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::db::DbPool;
use crate::entities::location::{self, Entity as LocationEntity};
use crate::entities::AuditAction;
use crate::errors::ServiceError;
use crate::services::audit::{AuditSink, SYSTEM_ACTOR};

/// Full field set for creating or replacing a location.
///
/// `warehouse_id` stays mutable even when placements reference the
/// location.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LocationData {
    #[validate(range(min = 1, message = "warehouse_id must be positive"))]
    pub warehouse_id: i32,
    #[validate(length(min = 1, max = 50, message = "code must be 1..=50 characters"))]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 100, message = "name must be 1..=100 characters"))]
    pub name: Option<String>,
}

#[derive(Clone)]
pub struct LocationService {
    db: Arc<DbPool>,
    audit: AuditSink,
}

impl LocationService {
    pub fn new(db: Arc<DbPool>, audit: AuditSink) -> Self {
        Self { db, audit }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, limit: Option<u64>) -> Result<Vec<location::Model>, ServiceError> {
        let mut query = LocationEntity::find().filter(location::Column::IsDeleted.eq(false));
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        Ok(query.all(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<location::Model>, ServiceError> {
        Ok(LocationEntity::find()
            .filter(location::Column::IsDeleted.eq(false))
            .filter(location::Column::Id.eq(id))
            .one(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get_any(&self, id: i32) -> Result<Option<location::Model>, ServiceError> {
        Ok(LocationEntity::find_by_id(id).one(&*self.db).await?)
    }

    #[instrument(skip(self, data))]
    pub async fn create(&self, data: LocationData) -> Result<location::Model, ServiceError> {
        data.validate()?;
        let now = Utc::now();

        let model = location::ActiveModel {
            warehouse_id: Set(data.warehouse_id),
            code: Set(data.code),
            name: Set(data.name),
            created_at: Set(now),
            updated_at: Set(now),
            is_deleted: Set(false),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        info!(location_id = model.id, warehouse_id = model.warehouse_id, "location created");
        self.audit
            .record(
                SYSTEM_ACTOR,
                "Location",
                AuditAction::Create,
                "/api/v1/locations",
                format!("Created location {}", model.id),
            )
            .await;
        Ok(model)
    }

    #[instrument(skip(self, data))]
    pub async fn update(
        &self,
        id: i32,
        data: LocationData,
    ) -> Result<Option<location::Model>, ServiceError> {
        data.validate()?;

        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: location::ActiveModel = existing.into();
        active.warehouse_id = Set(data.warehouse_id);
        active.code = Set(data.code);
        active.name = Set(data.name);
        active.updated_at = Set(Utc::now());

        let model = active.update(&*self.db).await?;
        self.audit
            .record(
                SYSTEM_ACTOR,
                "Location",
                AuditAction::Update,
                &format!("/api/v1/locations/{id}"),
                format!("Updated location {id}"),
            )
            .await;
        Ok(Some(model))
    }

    #[instrument(skip(self))]
    pub async fn soft_delete(&self, id: i32) -> Result<bool, ServiceError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(false);
        };

        let mut active: location::ActiveModel = existing.into();
        active.is_deleted = Set(true);
        active.updated_at = Set(Utc::now());
        active.update(&*self.db).await?;

        self.audit
            .record(
                SYSTEM_ACTOR,
                "Location",
                AuditAction::Delete,
                &format!("/api/v1/locations/{id}"),
                format!("Soft deleted location {id}"),
            )
            .await;
        Ok(true)
    }
}
