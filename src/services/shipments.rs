use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::db::DbPool;
use crate::entities::shipment::{self, Entity as ShipmentEntity};
use crate::entities::{AuditAction, LedgerParent, StockLine, StockParentKind};
use crate::errors::ServiceError;
use crate::services::audit::{AuditSink, SYSTEM_ACTOR};
use crate::services::ledger;

/// Full field set for creating or replacing a shipment, ledger lines
/// included.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShipmentData {
    pub order_id: i32,
    pub source_id: i32,
    pub order_date: DateTime<Utc>,
    pub request_date: DateTime<Utc>,
    pub shipment_date: DateTime<Utc>,
    pub shipment_type: Option<String>,
    pub shipment_status: Option<String>,
    pub notes: Option<String>,
    pub carrier_code: Option<String>,
    pub carrier_description: Option<String>,
    pub service_code: Option<String>,
    pub payment_type: Option<String>,
    pub transfer_mode: Option<String>,
    #[serde(default)]
    pub total_package_count: i32,
    #[serde(default)]
    pub total_package_weight: Decimal,
    #[serde(default)]
    pub items: Vec<StockLine>,
}

/// A shipment with its ledger lines eagerly loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipmentWithLedger {
    #[serde(flatten)]
    pub shipment: shipment::Model,
    pub items: Vec<StockLine>,
}

#[derive(Clone)]
pub struct ShipmentService {
    db: Arc<DbPool>,
    audit: AuditSink,
}

impl ShipmentService {
    pub fn new(db: Arc<DbPool>, audit: AuditSink) -> Self {
        Self { db, audit }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, limit: Option<u64>) -> Result<Vec<ShipmentWithLedger>, ServiceError> {
        let mut query = ShipmentEntity::find().filter(shipment::Column::IsDeleted.eq(false));
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let shipments = query.all(&*self.db).await?;

        let ids: Vec<i32> = shipments.iter().map(|s| s.id).collect();
        let mut grouped =
            ledger::load_lines_grouped(&*self.db, StockParentKind::Shipment, &ids).await?;

        Ok(shipments
            .into_iter()
            .map(|shipment| {
                let items = grouped.remove(&shipment.id).unwrap_or_default();
                ShipmentWithLedger { shipment, items }
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<ShipmentWithLedger>, ServiceError> {
        let shipment = ShipmentEntity::find()
            .filter(shipment::Column::IsDeleted.eq(false))
            .filter(shipment::Column::Id.eq(id))
            .one(&*self.db)
            .await?;

        let Some(shipment) = shipment else {
            return Ok(None);
        };

        let items = ledger::load_lines(&*self.db, LedgerParent::Shipment(shipment.id)).await?;
        Ok(Some(ShipmentWithLedger { shipment, items }))
    }

    #[instrument(skip(self))]
    pub async fn get_any(&self, id: i32) -> Result<Option<shipment::Model>, ServiceError> {
        Ok(ShipmentEntity::find_by_id(id).one(&*self.db).await?)
    }

    #[instrument(skip(self, data))]
    pub async fn create(&self, data: ShipmentData) -> Result<ShipmentWithLedger, ServiceError> {
        data.validate()?;
        let now = Utc::now();

        let shipment = shipment::ActiveModel {
            order_id: Set(data.order_id),
            source_id: Set(data.source_id),
            order_date: Set(data.order_date),
            request_date: Set(data.request_date),
            shipment_date: Set(data.shipment_date),
            shipment_type: Set(data.shipment_type),
            shipment_status: Set(data.shipment_status),
            notes: Set(data.notes),
            carrier_code: Set(data.carrier_code),
            carrier_description: Set(data.carrier_description),
            service_code: Set(data.service_code),
            payment_type: Set(data.payment_type),
            transfer_mode: Set(data.transfer_mode),
            total_package_count: Set(data.total_package_count),
            total_package_weight: Set(data.total_package_weight),
            created_at: Set(now),
            updated_at: Set(now),
            is_deleted: Set(false),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        ledger::attach_lines(&*self.db, LedgerParent::Shipment(shipment.id), &data.items).await?;

        info!(shipment_id = shipment.id, lines = data.items.len(), "shipment created");
        self.audit
            .record(
                SYSTEM_ACTOR,
                "Shipment",
                AuditAction::Create,
                "/api/v1/shipments",
                format!("Created shipment {}", shipment.id),
            )
            .await;

        Ok(ShipmentWithLedger {
            shipment,
            items: data.items,
        })
    }

    #[instrument(skip(self, data))]
    pub async fn update(
        &self,
        id: i32,
        data: ShipmentData,
    ) -> Result<Option<ShipmentWithLedger>, ServiceError> {
        data.validate()?;

        let existing = ShipmentEntity::find()
            .filter(shipment::Column::IsDeleted.eq(false))
            .filter(shipment::Column::Id.eq(id))
            .one(&*self.db)
            .await?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: shipment::ActiveModel = existing.into();
        active.order_id = Set(data.order_id);
        active.source_id = Set(data.source_id);
        active.order_date = Set(data.order_date);
        active.request_date = Set(data.request_date);
        active.shipment_date = Set(data.shipment_date);
        active.shipment_type = Set(data.shipment_type);
        active.shipment_status = Set(data.shipment_status);
        active.notes = Set(data.notes);
        active.carrier_code = Set(data.carrier_code);
        active.carrier_description = Set(data.carrier_description);
        active.service_code = Set(data.service_code);
        active.payment_type = Set(data.payment_type);
        active.transfer_mode = Set(data.transfer_mode);
        active.total_package_count = Set(data.total_package_count);
        active.total_package_weight = Set(data.total_package_weight);
        active.updated_at = Set(Utc::now());

        let shipment = active.update(&*self.db).await?;
        ledger::replace_lines(&*self.db, LedgerParent::Shipment(shipment.id), &data.items).await?;

        self.audit
            .record(
                SYSTEM_ACTOR,
                "Shipment",
                AuditAction::Update,
                &format!("/api/v1/shipments/{id}"),
                format!("Updated shipment {id}"),
            )
            .await;

        Ok(Some(ShipmentWithLedger {
            shipment,
            items: data.items,
        }))
    }

    #[instrument(skip(self))]
    pub async fn soft_delete(&self, id: i32) -> Result<bool, ServiceError> {
        let existing = ShipmentEntity::find()
            .filter(shipment::Column::IsDeleted.eq(false))
            .filter(shipment::Column::Id.eq(id))
            .one(&*self.db)
            .await?;

        let Some(existing) = existing else {
            return Ok(false);
        };

        let mut active: shipment::ActiveModel = existing.into();
        active.is_deleted = Set(true);
        active.updated_at = Set(Utc::now());
        active.update(&*self.db).await?;

        self.audit
            .record(
                SYSTEM_ACTOR,
                "Shipment",
                AuditAction::Delete,
                &format!("/api/v1/shipments/{id}"),
                format!("Soft deleted shipment {id}"),
            )
            .await;
        Ok(true)
    }
}
