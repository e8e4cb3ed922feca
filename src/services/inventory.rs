use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::db::DbPool;
use crate::entities::inventory::{self, Entity as InventoryEntity};
use crate::entities::inventory_location::{self, Entity as InventoryLocationEntity};
use crate::entities::location::Entity as LocationEntity;
use crate::entities::{location, AuditAction, HazardClassification};
use crate::errors::ServiceError;
use crate::services::audit::{AuditSink, SYSTEM_ACTOR};

/// Full field set for creating or replacing an inventory record.
///
/// The five totals are taken as given; no arithmetic relationship between
/// them (or against placement quantities) is checked.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct InventoryData {
    #[validate(length(min = 1, message = "item_id must not be empty"))]
    pub item_id: Option<String>,
    pub description: Option<String>,
    pub item_reference: Option<String>,
    #[serde(default)]
    pub hazard_classification: HazardClassification,
    #[serde(default)]
    pub total_on_hand: i32,
    #[serde(default)]
    pub total_expected: i32,
    #[serde(default)]
    pub total_ordered: i32,
    #[serde(default)]
    pub total_allocated: i32,
    #[serde(default)]
    pub total_available: i32,
}

/// New placement of an inventory at a location.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlacementData {
    // Deserializes to 0 when the caller lets the URL path supply the
    // owning inventory; the handler fills it in before validation runs.
    #[serde(default)]
    #[validate(range(min = 1, message = "inventory_id must be positive"))]
    pub inventory_id: i32,
    #[validate(range(min = 1, message = "location_id must be positive"))]
    pub location_id: i32,
    #[serde(default)]
    pub quantity: i32,
}

/// A placement row together with its eagerly loaded location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
    #[serde(flatten)]
    pub inventory_location: inventory_location::Model,
    pub location: Option<location::Model>,
}

#[derive(Clone)]
pub struct InventoryService {
    db: Arc<DbPool>,
    audit: AuditSink,
}

impl InventoryService {
    pub fn new(db: Arc<DbPool>, audit: AuditSink) -> Self {
        Self { db, audit }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, limit: Option<u64>) -> Result<Vec<inventory::Model>, ServiceError> {
        let mut query = InventoryEntity::find().filter(inventory::Column::IsDeleted.eq(false));
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        Ok(query.all(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<inventory::Model>, ServiceError> {
        Ok(InventoryEntity::find()
            .filter(inventory::Column::IsDeleted.eq(false))
            .filter(inventory::Column::Id.eq(id))
            .one(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get_any(&self, id: i32) -> Result<Option<inventory::Model>, ServiceError> {
        Ok(InventoryEntity::find_by_id(id).one(&*self.db).await?)
    }

    #[instrument(skip(self, data))]
    pub async fn create(&self, data: InventoryData) -> Result<inventory::Model, ServiceError> {
        data.validate()?;
        let now = Utc::now();

        let model = inventory::ActiveModel {
            item_id: Set(data.item_id),
            description: Set(data.description),
            item_reference: Set(data.item_reference),
            hazard_classification: Set(data.hazard_classification),
            total_on_hand: Set(data.total_on_hand),
            total_expected: Set(data.total_expected),
            total_ordered: Set(data.total_ordered),
            total_allocated: Set(data.total_allocated),
            total_available: Set(data.total_available),
            created_at: Set(now),
            updated_at: Set(now),
            is_deleted: Set(false),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        info!(inventory_id = model.id, "inventory created");
        self.audit
            .record(
                SYSTEM_ACTOR,
                "Inventory",
                AuditAction::Create,
                "/api/v1/inventories",
                format!("Created inventory {}", model.id),
            )
            .await;
        Ok(model)
    }

    #[instrument(skip(self, data))]
    pub async fn update(
        &self,
        id: i32,
        data: InventoryData,
    ) -> Result<Option<inventory::Model>, ServiceError> {
        data.validate()?;

        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: inventory::ActiveModel = existing.into();
        active.item_id = Set(data.item_id);
        active.description = Set(data.description);
        active.item_reference = Set(data.item_reference);
        active.hazard_classification = Set(data.hazard_classification);
        active.total_on_hand = Set(data.total_on_hand);
        active.total_expected = Set(data.total_expected);
        active.total_ordered = Set(data.total_ordered);
        active.total_allocated = Set(data.total_allocated);
        active.total_available = Set(data.total_available);
        active.updated_at = Set(Utc::now());

        let model = active.update(&*self.db).await?;
        self.audit
            .record(
                SYSTEM_ACTOR,
                "Inventory",
                AuditAction::Update,
                &format!("/api/v1/inventories/{id}"),
                format!("Updated inventory {id}"),
            )
            .await;
        Ok(Some(model))
    }

    #[instrument(skip(self))]
    pub async fn soft_delete(&self, id: i32) -> Result<bool, ServiceError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(false);
        };

        let mut active: inventory::ActiveModel = existing.into();
        active.is_deleted = Set(true);
        active.updated_at = Set(Utc::now());
        active.update(&*self.db).await?;

        self.audit
            .record(
                SYSTEM_ACTOR,
                "Inventory",
                AuditAction::Delete,
                &format!("/api/v1/inventories/{id}"),
                format!("Soft deleted inventory {id}"),
            )
            .await;
        Ok(true)
    }

    /// Placements of one inventory with their locations eagerly loaded.
    ///
    /// Placement rows are not filtered by their own soft-delete flag here.
    #[instrument(skip(self))]
    pub async fn get_inventory_locations(
        &self,
        inventory_id: i32,
    ) -> Result<Vec<Placement>, ServiceError> {
        let rows = InventoryLocationEntity::find()
            .filter(inventory_location::Column::InventoryId.eq(inventory_id))
            .find_also_related(LocationEntity)
            .all(&*self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(inventory_location, location)| Placement {
                inventory_location,
                location,
            })
            .collect())
    }

    /// Adds a placement. Deliberately does not re-run the hazard compliance
    /// check; the checker is advisory and invoked separately.
    #[instrument(skip(self, data))]
    pub async fn add_inventory_location(
        &self,
        data: PlacementData,
    ) -> Result<inventory_location::Model, ServiceError> {
        data.validate()?;
        let now = Utc::now();

        let model = inventory_location::ActiveModel {
            inventory_id: Set(data.inventory_id),
            location_id: Set(data.location_id),
            quantity: Set(data.quantity),
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
                "InventoryLocation",
                AuditAction::Create,
                &format!("/api/v1/inventories/{}/locations", model.inventory_id),
                format!("Added inventory location {}", model.id),
            )
            .await;
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn soft_delete_inventory_location(&self, id: i32) -> Result<bool, ServiceError> {
        let existing = InventoryLocationEntity::find()
            .filter(inventory_location::Column::IsDeleted.eq(false))
            .filter(inventory_location::Column::Id.eq(id))
            .one(&*self.db)
            .await?;

        let Some(existing) = existing else {
            return Ok(false);
        };

        let mut active: inventory_location::ActiveModel = existing.into();
        active.is_deleted = Set(true);
        active.updated_at = Set(Utc::now());
        active.update(&*self.db).await?;

        self.audit
            .record(
                SYSTEM_ACTOR,
                "InventoryLocation",
                AuditAction::Delete,
                &format!("/api/v1/inventorylocations/{id}"),
                format!("Soft deleted inventory location {id}"),
            )
            .await;
        Ok(true)
    }
}
