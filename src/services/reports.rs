use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::DbPool;
use crate::entities::order::{self, Entity as OrderEntity};
use crate::entities::warehouse::{self, Entity as WarehouseEntity};
use crate::entities::StockParentKind;
use crate::errors::ServiceError;
use crate::services::ledger;

/// Order volume for a single warehouse. `total_items` is the summed ledger
/// quantity across all of the warehouse's orders, not a distinct item count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub warehouse_id: i32,
    pub total_orders: u64,
    pub total_items: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub total_orders: u64,
    pub total_revenue: Decimal,
}

#[derive(Clone)]
pub struct ReportingService {
    db: Arc<DbPool>,
}

impl ReportingService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Counts a warehouse's live orders and sums the quantities on their
    /// ledger lines. Soft-deleted orders are excluded; their ledger lines
    /// therefore drop out of the totals even though the rows still exist.
    #[instrument(skip(self))]
    pub async fn warehouse_report(&self, warehouse_id: i32) -> Result<ReportSummary, ServiceError> {
        let warehouse = WarehouseEntity::find()
            .filter(warehouse::Column::IsDeleted.eq(false))
            .filter(warehouse::Column::Id.eq(warehouse_id))
            .one(&*self.db)
            .await?;
        if warehouse.is_none() {
            return Err(ServiceError::NotFound(format!(
                "Warehouse {warehouse_id} not found"
            )));
        }

        let orders = OrderEntity::find()
            .filter(order::Column::IsDeleted.eq(false))
            .filter(order::Column::WarehouseId.eq(warehouse_id))
            .all(&*self.db)
            .await?;

        let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
        let total_items =
            ledger::sum_quantities(&*self.db, StockParentKind::Order, &order_ids).await?;

        Ok(ReportSummary {
            warehouse_id,
            total_orders: orders.len() as u64,
            total_items,
        })
    }

    /// Sums `total_amount` over live orders created in `[start, end]`,
    /// rounded to two decimal places.
    ///
    /// The window is matched against `created_at`, not the business
    /// `order_date`; a backdated order created today counts today.
    #[instrument(skip(self))]
    pub async fn revenue_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<RevenueSummary, ServiceError> {
        let orders = OrderEntity::find()
            .filter(order::Column::IsDeleted.eq(false))
            .filter(order::Column::CreatedAt.gte(start))
            .filter(order::Column::CreatedAt.lte(end))
            .all(&*self.db)
            .await?;

        let total_revenue: Decimal = orders.iter().map(|o| o.total_amount).sum();

        Ok(RevenueSummary {
            start,
            end,
            total_orders: orders.len() as u64,
            total_revenue: total_revenue.round_dp(2),
        })
    }
}
