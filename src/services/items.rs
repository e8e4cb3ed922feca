use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::item::{self, Entity as ItemEntity};
use crate::entities::AuditAction;
use crate::errors::ServiceError;
use crate::services::audit::{AuditSink, SYSTEM_ACTOR};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ItemData {
    #[validate(length(min = 1, max = 50, message = "uid must be 1..=50 characters"))]
    pub uid: Option<String>,
    #[validate(length(min = 1, max = 50, message = "code must be 1..=50 characters"))]
    pub code: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub upc_code: Option<String>,
    pub model_number: Option<String>,
    pub commodity_code: Option<String>,
    pub item_line: Option<i32>,
    pub item_group: Option<i32>,
    pub item_type: Option<i32>,
    #[serde(default)]
    pub unit_purchase_quantity: i32,
    #[serde(default)]
    pub unit_order_quantity: i32,
    #[serde(default)]
    pub pack_order_quantity: i32,
    pub supplier_id: Option<i32>,
    pub supplier_code: Option<String>,
    pub supplier_part_number: Option<String>,
}

#[derive(Clone)]
pub struct ItemService {
    db: Arc<DbPool>,
    audit: AuditSink,
}

impl ItemService {
    pub fn new(db: Arc<DbPool>, audit: AuditSink) -> Self {
        Self { db, audit }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, limit: Option<u64>) -> Result<Vec<item::Model>, ServiceError> {
        let mut query = ItemEntity::find().filter(item::Column::IsDeleted.eq(false));
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        Ok(query.all(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<item::Model>, ServiceError> {
        Ok(ItemEntity::find()
            .filter(item::Column::IsDeleted.eq(false))
            .filter(item::Column::Id.eq(id))
            .one(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get_any(&self, id: i32) -> Result<Option<item::Model>, ServiceError> {
        Ok(ItemEntity::find_by_id(id).one(&*self.db).await?)
    }

    #[instrument(skip(self, data))]
    pub async fn create(&self, data: ItemData) -> Result<item::Model, ServiceError> {
        data.validate()?;
        let now = Utc::now();

        let model = item::ActiveModel {
            uid: Set(data.uid),
            code: Set(data.code),
            description: Set(data.description),
            short_description: Set(data.short_description),
            upc_code: Set(data.upc_code),
            model_number: Set(data.model_number),
            commodity_code: Set(data.commodity_code),
            item_line: Set(data.item_line),
            item_group: Set(data.item_group),
            item_type: Set(data.item_type),
            unit_purchase_quantity: Set(data.unit_purchase_quantity),
            unit_order_quantity: Set(data.unit_order_quantity),
            pack_order_quantity: Set(data.pack_order_quantity),
            supplier_id: Set(data.supplier_id),
            supplier_code: Set(data.supplier_code),
            supplier_part_number: Set(data.supplier_part_number),
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
                "Item",
                AuditAction::Create,
                "/api/v1/items",
                format!("Created item {}", model.id),
            )
            .await;
        Ok(model)
    }

    #[instrument(skip(self, data))]
    pub async fn update(&self, id: i32, data: ItemData) -> Result<Option<item::Model>, ServiceError> {
        data.validate()?;

        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: item::ActiveModel = existing.into();
        active.uid = Set(data.uid);
        active.code = Set(data.code);
        active.description = Set(data.description);
        active.short_description = Set(data.short_description);
        active.upc_code = Set(data.upc_code);
        active.model_number = Set(data.model_number);
        active.commodity_code = Set(data.commodity_code);
        active.item_line = Set(data.item_line);
        active.item_group = Set(data.item_group);
        active.item_type = Set(data.item_type);
        active.unit_purchase_quantity = Set(data.unit_purchase_quantity);
        active.unit_order_quantity = Set(data.unit_order_quantity);
        active.pack_order_quantity = Set(data.pack_order_quantity);
        active.supplier_id = Set(data.supplier_id);
        active.supplier_code = Set(data.supplier_code);
        active.supplier_part_number = Set(data.supplier_part_number);
        active.updated_at = Set(Utc::now());

        let model = active.update(&*self.db).await?;
        self.audit
            .record(
                SYSTEM_ACTOR,
                "Item",
                AuditAction::Update,
                &format!("/api/v1/items/{id}"),
                format!("Updated item {id}"),
            )
            .await;
        Ok(Some(model))
    }

    #[instrument(skip(self))]
    pub async fn soft_delete(&self, id: i32) -> Result<bool, ServiceError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(false);
        };

        let mut active: item::ActiveModel = existing.into();
        active.is_deleted = Set(true);
        active.updated_at = Set(Utc::now());
        active.update(&*self.db).await?;

        self.audit
            .record(
                SYSTEM_ACTOR,
                "Item",
                AuditAction::Delete,
                &format!("/api/v1/items/{id}"),
                format!("Soft deleted item {id}"),
            )
            .await;
        Ok(true)
    }
}
