use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::db::DbPool;
use crate::entities::order::{self, Entity as OrderEntity};
use crate::entities::{AuditAction, LedgerParent, StockLine, StockParentKind};
use crate::errors::ServiceError;
use crate::services::audit::{AuditSink, SYSTEM_ACTOR};
use crate::services::ledger;

/// Full field set for creating or replacing an order, ledger lines
/// included. On update the line set is replaced wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderData {
    pub source_id: i32,
    pub order_date: DateTime<Utc>,
    pub request_date: DateTime<Utc>,
    #[validate(length(min = 1, max = 50, message = "reference must be 1..=50 characters"))]
    pub reference: Option<String>,
    pub reference_extra: Option<String>,
    pub order_status: Option<String>,
    pub notes: Option<String>,
    pub shipping_notes: Option<String>,
    pub picking_notes: Option<String>,
    pub warehouse_id: i32,
    pub ship_to: Option<String>,
    pub bill_to: Option<String>,
    pub shipment_id: Option<i32>,
    #[serde(default)]
    pub total_amount: Decimal,
    #[serde(default)]
    pub total_discount: Decimal,
    #[serde(default)]
    pub total_tax: Decimal,
    #[serde(default)]
    pub total_surcharge: Decimal,
    #[serde(default)]
    pub items: Vec<StockLine>,
}

/// An order with its ledger lines eagerly loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithLedger {
    #[serde(flatten)]
    pub order: order::Model,
    pub items: Vec<StockLine>,
}

#[derive(Clone)]
pub struct OrderService {
    db: Arc<DbPool>,
    audit: AuditSink,
}

impl OrderService {
    pub fn new(db: Arc<DbPool>, audit: AuditSink) -> Self {
        Self { db, audit }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, limit: Option<u64>) -> Result<Vec<OrderWithLedger>, ServiceError> {
        let mut query = OrderEntity::find().filter(order::Column::IsDeleted.eq(false));
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let orders = query.all(&*self.db).await?;

        let ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
        let mut grouped =
            ledger::load_lines_grouped(&*self.db, StockParentKind::Order, &ids).await?;

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = grouped.remove(&order.id).unwrap_or_default();
                OrderWithLedger { order, items }
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<OrderWithLedger>, ServiceError> {
        let order = OrderEntity::find()
            .filter(order::Column::IsDeleted.eq(false))
            .filter(order::Column::Id.eq(id))
            .one(&*self.db)
            .await?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = ledger::load_lines(&*self.db, LedgerParent::Order(order.id)).await?;
        Ok(Some(OrderWithLedger { order, items }))
    }

    /// Lookup bypassing the soft-delete filter, for audit/debugging reads.
    #[instrument(skip(self))]
    pub async fn get_any(&self, id: i32) -> Result<Option<order::Model>, ServiceError> {
        Ok(OrderEntity::find_by_id(id).one(&*self.db).await?)
    }

    #[instrument(skip(self, data))]
    pub async fn create(&self, data: OrderData) -> Result<OrderWithLedger, ServiceError> {
        data.validate()?;
        let now = Utc::now();

        let order = order::ActiveModel {
            source_id: Set(data.source_id),
            order_date: Set(data.order_date),
            request_date: Set(data.request_date),
            reference: Set(data.reference),
            reference_extra: Set(data.reference_extra),
            order_status: Set(data.order_status),
            notes: Set(data.notes),
            shipping_notes: Set(data.shipping_notes),
            picking_notes: Set(data.picking_notes),
            warehouse_id: Set(data.warehouse_id),
            ship_to: Set(data.ship_to),
            bill_to: Set(data.bill_to),
            shipment_id: Set(data.shipment_id),
            total_amount: Set(data.total_amount),
            total_discount: Set(data.total_discount),
            total_tax: Set(data.total_tax),
            total_surcharge: Set(data.total_surcharge),
            created_at: Set(now),
            updated_at: Set(now),
            is_deleted: Set(false),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        ledger::attach_lines(&*self.db, LedgerParent::Order(order.id), &data.items).await?;

        info!(order_id = order.id, lines = data.items.len(), "order created");
        self.audit
            .record(
                SYSTEM_ACTOR,
                "Order",
                AuditAction::Create,
                "/api/v1/orders",
                format!("Created order {}", order.id),
            )
            .await;

        Ok(OrderWithLedger {
            order,
            items: data.items,
        })
    }

    /// Full-field replace; the ledger line set is replaced wholesale, so an
    /// omitted line is removed.
    #[instrument(skip(self, data))]
    pub async fn update(
        &self,
        id: i32,
        data: OrderData,
    ) -> Result<Option<OrderWithLedger>, ServiceError> {
        data.validate()?;

        let existing = OrderEntity::find()
            .filter(order::Column::IsDeleted.eq(false))
            .filter(order::Column::Id.eq(id))
            .one(&*self.db)
            .await?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: order::ActiveModel = existing.into();
        active.source_id = Set(data.source_id);
        active.order_date = Set(data.order_date);
        active.request_date = Set(data.request_date);
        active.reference = Set(data.reference);
        active.reference_extra = Set(data.reference_extra);
        active.order_status = Set(data.order_status);
        active.notes = Set(data.notes);
        active.shipping_notes = Set(data.shipping_notes);
        active.picking_notes = Set(data.picking_notes);
        active.warehouse_id = Set(data.warehouse_id);
        active.ship_to = Set(data.ship_to);
        active.bill_to = Set(data.bill_to);
        active.shipment_id = Set(data.shipment_id);
        active.total_amount = Set(data.total_amount);
        active.total_discount = Set(data.total_discount);
        active.total_tax = Set(data.total_tax);
        active.total_surcharge = Set(data.total_surcharge);
        active.updated_at = Set(Utc::now());

        let order = active.update(&*self.db).await?;
        ledger::replace_lines(&*self.db, LedgerParent::Order(order.id), &data.items).await?;

        self.audit
            .record(
                SYSTEM_ACTOR,
                "Order",
                AuditAction::Update,
                &format!("/api/v1/orders/{id}"),
                format!("Updated order {id}"),
            )
            .await;

        Ok(Some(OrderWithLedger {
            order,
            items: data.items,
        }))
    }

    /// Soft delete. Ledger lines stay in place; only wholesale replacement
    /// ever removes them.
    #[instrument(skip(self))]
    pub async fn soft_delete(&self, id: i32) -> Result<bool, ServiceError> {
        let existing = OrderEntity::find()
            .filter(order::Column::IsDeleted.eq(false))
            .filter(order::Column::Id.eq(id))
            .one(&*self.db)
            .await?;

        let Some(existing) = existing else {
            return Ok(false);
        };

        let mut active: order::ActiveModel = existing.into();
        active.is_deleted = Set(true);
        active.updated_at = Set(Utc::now());
        active.update(&*self.db).await?;

        self.audit
            .record(
                SYSTEM_ACTOR,
                "Order",
                AuditAction::Delete,
                &format!("/api/v1/orders/{id}"),
                format!("Soft deleted order {id}"),
            )
            .await;
        Ok(true)
    }
}
