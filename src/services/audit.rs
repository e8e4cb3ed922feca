use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, QuerySelect, Set};
use tracing::warn;

use crate::db::DbPool;
use crate::entities::audit_log::{self, AuditAction, Entity as AuditLogEntity};
use crate::errors::ServiceError;

/// Actor recorded for mutations not attributed to a caller identity.
pub const SYSTEM_ACTOR: &str = "system";

/// Append-only sink for the mutation audit trail.
#[derive(Clone)]
pub struct AuditSink {
    db: Arc<DbPool>,
}

impl AuditSink {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Appends one audit record.
    ///
    /// Best-effort: a failed write is logged and never propagated, so the
    /// mutation that triggered it is never blocked or rolled back.
    pub async fn record(
        &self,
        actor: &str,
        entity: &str,
        action: AuditAction,
        endpoint: &str,
        details: impl Into<String>,
    ) {
        let row = audit_log::ActiveModel {
            timestamp: Set(Utc::now()),
            actor: Set(actor.to_string()),
            entity: Set(entity.to_string()),
            action: Set(action),
            endpoint: Set(endpoint.to_string()),
            details: Set(details.into()),
            ..Default::default()
        };

        if let Err(e) = row.insert(&*self.db).await {
            warn!(error = %e, entity = entity, "failed to write audit record");
        }
    }

    /// Most recent audit records, newest first. Admin/debugging path.
    pub async fn recent(&self, limit: u64) -> Result<Vec<audit_log::Model>, ServiceError> {
        Ok(AuditLogEntity::find()
            .order_by_desc(audit_log::Column::Id)
            .limit(limit)
            .all(&*self.db)
            .await?)
    }
}
