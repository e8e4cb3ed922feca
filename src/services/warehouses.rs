use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, QueryFilter, QuerySelect, RelationTrait,
    Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::db::DbPool;
use crate::entities::warehouse::{self, Contact, Entity as WarehouseEntity};
use crate::entities::{inventory, inventory_location, location, AuditAction, HazardClassification};
use crate::errors::ServiceError;
use crate::services::audit::{AuditSink, SYSTEM_ACTOR};

/// Full field set for creating or replacing a warehouse.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct WarehouseData {
    #[validate(length(min = 1, message = "code must not be empty"))]
    pub code: Option<String>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub address: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    #[serde(default)]
    pub hazard_classification: HazardClassification,
    #[serde(default)]
    pub contact: Contact,
}

/// Outcome of an on-demand hazard compliance evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub compliant: bool,
    pub violations: Vec<inventory::Model>,
}

#[derive(Clone)]
pub struct WarehouseService {
    db: Arc<DbPool>,
    audit: AuditSink,
}

impl WarehouseService {
    pub fn new(db: Arc<DbPool>, audit: AuditSink) -> Self {
        Self { db, audit }
    }

    /// Non-deleted warehouses, optionally capped.
    #[instrument(skip(self))]
    pub async fn list(&self, limit: Option<u64>) -> Result<Vec<warehouse::Model>, ServiceError> {
        let mut query = WarehouseEntity::find().filter(warehouse::Column::IsDeleted.eq(false));
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        Ok(query.all(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<warehouse::Model>, ServiceError> {
        Ok(WarehouseEntity::find()
            .filter(warehouse::Column::IsDeleted.eq(false))
            .filter(warehouse::Column::Id.eq(id))
            .one(&*self.db)
            .await?)
    }

    /// Lookup bypassing the soft-delete filter, for audit/debugging reads.
    #[instrument(skip(self))]
    pub async fn get_any(&self, id: i32) -> Result<Option<warehouse::Model>, ServiceError> {
        Ok(WarehouseEntity::find_by_id(id).one(&*self.db).await?)
    }

    #[instrument(skip(self, data))]
    pub async fn create(&self, data: WarehouseData) -> Result<warehouse::Model, ServiceError> {
        data.validate()?;
        let now = Utc::now();

        let model = warehouse::ActiveModel {
            code: Set(data.code),
            name: Set(data.name),
            address: Set(data.address),
            zip: Set(data.zip),
            city: Set(data.city),
            province: Set(data.province),
            country: Set(data.country),
            hazard_classification: Set(data.hazard_classification),
            contact_name: Set(data.contact.name),
            contact_phone: Set(data.contact.phone),
            contact_email: Set(data.contact.email),
            created_at: Set(now),
            updated_at: Set(now),
            is_deleted: Set(false),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        info!(warehouse_id = model.id, "warehouse created");
        self.audit
            .record(
                SYSTEM_ACTOR,
                "Warehouse",
                AuditAction::Create,
                "/api/v1/warehouses",
                format!("Created warehouse {}", model.id),
            )
            .await;
        Ok(model)
    }

    /// Full-field replace of a non-deleted warehouse.
    #[instrument(skip(self, data))]
    pub async fn update(
        &self,
        id: i32,
        data: WarehouseData,
    ) -> Result<Option<warehouse::Model>, ServiceError> {
        data.validate()?;

        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: warehouse::ActiveModel = existing.into();
        active.code = Set(data.code);
        active.name = Set(data.name);
        active.address = Set(data.address);
        active.zip = Set(data.zip);
        active.city = Set(data.city);
        active.province = Set(data.province);
        active.country = Set(data.country);
        active.hazard_classification = Set(data.hazard_classification);
        active.contact_name = Set(data.contact.name);
        active.contact_phone = Set(data.contact.phone);
        active.contact_email = Set(data.contact.email);
        active.updated_at = Set(Utc::now());

        let model = active.update(&*self.db).await?;
        self.audit
            .record(
                SYSTEM_ACTOR,
                "Warehouse",
                AuditAction::Update,
                &format!("/api/v1/warehouses/{id}"),
                format!("Updated warehouse {id}"),
            )
            .await;
        Ok(Some(model))
    }

    /// Marks the warehouse deleted. Returns false (writing no audit record)
    /// when the id is unknown or already deleted.
    #[instrument(skip(self))]
    pub async fn soft_delete(&self, id: i32) -> Result<bool, ServiceError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(false);
        };

        let mut active: warehouse::ActiveModel = existing.into();
        active.is_deleted = Set(true);
        active.updated_at = Set(Utc::now());
        active.update(&*self.db).await?;

        self.audit
            .record(
                SYSTEM_ACTOR,
                "Warehouse",
                AuditAction::Delete,
                &format!("/api/v1/warehouses/{id}"),
                format!("Soft deleted warehouse {id}"),
            )
            .await;
        Ok(true)
    }

    /// Evaluates the hazard dominance rule for one warehouse.
    ///
    /// Walks InventoryLocation -> Location to find every inventory placed in
    /// the warehouse and flags those classified strictly above it. Advisory
    /// and read-only; placement writes never trigger this.
    #[instrument(skip(self))]
    pub async fn check_hazard_compliance(
        &self,
        warehouse_id: i32,
    ) -> Result<ComplianceReport, ServiceError> {
        let warehouse = self.get(warehouse_id).await?.ok_or_else(|| {
            ServiceError::NotFound(format!("Warehouse {warehouse_id} not found"))
        })?;

        let placed = inventory::Entity::find()
            .filter(inventory::Column::IsDeleted.eq(false))
            .join(
                JoinType::InnerJoin,
                inventory::Relation::InventoryLocations.def(),
            )
            .join(
                JoinType::InnerJoin,
                inventory_location::Relation::Location.def(),
            )
            .filter(location::Column::WarehouseId.eq(warehouse_id))
            .distinct()
            .all(&*self.db)
            .await?;

        let violations: Vec<inventory::Model> = placed
            .into_iter()
            .filter(|inv| inv.hazard_classification > warehouse.hazard_classification)
            .collect();

        Ok(ComplianceReport {
            compliant: violations.is_empty(),
            violations,
        })
    }
}
