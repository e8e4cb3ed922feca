use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use validator::Validate;

use crate::db::DbPool;
use crate::entities::transfer::{self, Entity as TransferEntity};
use crate::entities::{AuditAction, LedgerParent, StockLine, StockParentKind};
use crate::errors::ServiceError;
use crate::services::audit::{AuditSink, SYSTEM_ACTOR};
use crate::services::ledger;

/// Full field set for creating or replacing a transfer, ledger lines
/// included. `transfer_from` is null for inbound movements.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TransferData {
    #[validate(length(min = 1, message = "reference must not be empty"))]
    pub reference: Option<String>,
    pub transfer_from: Option<i32>,
    pub transfer_to: Option<i32>,
    pub transfer_status: Option<String>,
    #[serde(default)]
    pub items: Vec<StockLine>,
}

/// A transfer with its ledger lines eagerly loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferWithLedger {
    #[serde(flatten)]
    pub transfer: transfer::Model,
    pub items: Vec<StockLine>,
}

#[derive(Clone)]
pub struct TransferService {
    db: Arc<DbPool>,
    audit: AuditSink,
}

impl TransferService {
    pub fn new(db: Arc<DbPool>, audit: AuditSink) -> Self {
        Self { db, audit }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, limit: Option<u64>) -> Result<Vec<TransferWithLedger>, ServiceError> {
        let mut query = TransferEntity::find().filter(transfer::Column::IsDeleted.eq(false));
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let transfers = query.all(&*self.db).await?;

        let ids: Vec<i32> = transfers.iter().map(|t| t.id).collect();
        let mut grouped =
            ledger::load_lines_grouped(&*self.db, StockParentKind::Transfer, &ids).await?;

        Ok(transfers
            .into_iter()
            .map(|transfer| {
                let items = grouped.remove(&transfer.id).unwrap_or_default();
                TransferWithLedger { transfer, items }
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<TransferWithLedger>, ServiceError> {
        let transfer = TransferEntity::find()
            .filter(transfer::Column::IsDeleted.eq(false))
            .filter(transfer::Column::Id.eq(id))
            .one(&*self.db)
            .await?;

        let Some(transfer) = transfer else {
            return Ok(None);
        };

        let items = ledger::load_lines(&*self.db, LedgerParent::Transfer(transfer.id)).await?;
        Ok(Some(TransferWithLedger { transfer, items }))
    }

    #[instrument(skip(self))]
    pub async fn get_any(&self, id: i32) -> Result<Option<transfer::Model>, ServiceError> {
        Ok(TransferEntity::find_by_id(id).one(&*self.db).await?)
    }

    #[instrument(skip(self, data))]
    pub async fn create(&self, data: TransferData) -> Result<TransferWithLedger, ServiceError> {
        data.validate()?;
        let now = Utc::now();

        let transfer = transfer::ActiveModel {
            reference: Set(data.reference),
            transfer_from: Set(data.transfer_from),
            transfer_to: Set(data.transfer_to),
            transfer_status: Set(data.transfer_status),
            created_at: Set(now),
            updated_at: Set(now),
            is_deleted: Set(false),
            ..Default::default()
        }
        .insert(&*self.db)
        .await?;

        ledger::attach_lines(&*self.db, LedgerParent::Transfer(transfer.id), &data.items).await?;

        info!(transfer_id = transfer.id, lines = data.items.len(), "transfer created");
        self.audit
            .record(
                SYSTEM_ACTOR,
                "Transfer",
                AuditAction::Create,
                "/api/v1/transfers",
                format!("Created transfer {}", transfer.id),
            )
            .await;

        Ok(TransferWithLedger {
            transfer,
            items: data.items,
        })
    }

    #[instrument(skip(self, data))]
    pub async fn update(
        &self,
        id: i32,
        data: TransferData,
    ) -> Result<Option<TransferWithLedger>, ServiceError> {
        data.validate()?;

        let existing = TransferEntity::find()
            .filter(transfer::Column::IsDeleted.eq(false))
            .filter(transfer::Column::Id.eq(id))
            .one(&*self.db)
            .await?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut active: transfer::ActiveModel = existing.into();
        active.reference = Set(data.reference);
        active.transfer_from = Set(data.transfer_from);
        active.transfer_to = Set(data.transfer_to);
        active.transfer_status = Set(data.transfer_status);
        active.updated_at = Set(Utc::now());

        let transfer = active.update(&*self.db).await?;
        ledger::replace_lines(&*self.db, LedgerParent::Transfer(transfer.id), &data.items).await?;

        self.audit
            .record(
                SYSTEM_ACTOR,
                "Transfer",
                AuditAction::Update,
                &format!("/api/v1/transfers/{id}"),
                format!("Updated transfer {id}"),
            )
            .await;

        Ok(Some(TransferWithLedger {
            transfer,
            items: data.items,
        }))
    }

    #[instrument(skip(self))]
    pub async fn soft_delete(&self, id: i32) -> Result<bool, ServiceError> {
        let existing = TransferEntity::find()
            .filter(transfer::Column::IsDeleted.eq(false))
            .filter(transfer::Column::Id.eq(id))
            .one(&*self.db)
            .await?;

        let Some(existing) = existing else {
            return Ok(false);
        };

        let mut active: transfer::ActiveModel = existing.into();
        active.is_deleted = Set(true);
        active.updated_at = Set(Utc::now());
        active.update(&*self.db).await?;

        self.audit
            .record(
                SYSTEM_ACTOR,
                "Transfer",
                AuditAction::Delete,
                &format!("/api/v1/transfers/{id}"),
                format!("Soft deleted transfer {id}"),
            )
            .await;
        Ok(true)
    }
}
