use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::supplier::{self, Entity as SupplierEntity};
use crate::entities::AuditAction;
use crate::errors::ServiceError;
use crate::services::audit::{AuditSink, SYSTEM_ACTOR};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SupplierData {
    #[validate(length(min = 1, message = "code must not be empty"))]
    pub code: Option<String>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub address: Option<String>,
    pub address_extra: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub contact_name: Option<String>,
    pub phonenumber: Option<String>,
    pub reference: Option<String>,
}

#[derive(Clone)]
pub struct SupplierService {
    db: Arc<DbPool>,
    audit: AuditSink,
}

impl SupplierService {
    pub fn new(db: Arc<DbPool>, audit: AuditSink) -> Self {
        Self { db, audit }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, limit: Option<u64>) -> Result<Vec<supplier::Model>, ServiceError> {
        let mut query = SupplierEntity::find().filter(supplier::Column::IsDeleted.eq(false));
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        Ok(query.all(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<supplier::Model>, ServiceError> {
        Ok(SupplierEntity::find()
            .filter(supplier::Column::IsDeleted.eq(false))
            .filter(supplier::Column::Id.eq(id))
            .one(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get_any(&self, id: i32) -> Result<Option<supplier::Model>, ServiceError> {
        Ok(SupplierEntity::find_by_id(id).one(&*self.db).await?)
    }

    #[instrument(skip(self, data))]
    pub async fn create(&self, data: SupplierData) -> Result<supplier::Model, ServiceError> {
        data.validate()?;
        let now = Utc::now();

        let model = supplier::ActiveModel {
            code: Set(data.code),
            name: Set(data.name),
            address: Set(data.address),
            address_extra: Set(data.address_extra),
            city: Set(data.city),
            zip_code: Set(data.zip_code),
            province: Set(data.province),
            country: Set(data.country),
            contact_name: Set(data.contact_name),
            phonenumber: Set(data.phonenumber),
            reference: Set(data.reference),
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
                "Supplier",
                AuditAction::Create,
                "/api/v1/suppliers",
                format!("Created supplier {}", model.id),
            )
            .await;
        Ok(model)
    }

    #[instrument(skip(self, data))]
    pub async fn update(
        &self,
        id: i32,
        data: SupplierData,
    ) -> Result<Option<supplier::Model>, ServiceError> {
        data.validate()?;

        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: supplier::ActiveModel = existing.into();
        active.code = Set(data.code);
        active.name = Set(data.name);
        active.address = Set(data.address);
        active.address_extra = Set(data.address_extra);
        active.city = Set(data.city);
        active.zip_code = Set(data.zip_code);
        active.province = Set(data.province);
        active.country = Set(data.country);
        active.contact_name = Set(data.contact_name);
        active.phonenumber = Set(data.phonenumber);
        active.reference = Set(data.reference);
        active.updated_at = Set(Utc::now());

        let model = active.update(&*self.db).await?;
        self.audit
            .record(
                SYSTEM_ACTOR,
                "Supplier",
                AuditAction::Update,
                &format!("/api/v1/suppliers/{id}"),
                format!("Updated supplier {id}"),
            )
            .await;
        Ok(Some(model))
    }

    #[instrument(skip(self))]
    pub async fn soft_delete(&self, id: i32) -> Result<bool, ServiceError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(false);
        };

        let mut active: supplier::ActiveModel = existing.into();
        active.is_deleted = Set(true);
        active.updated_at = Set(Utc::now());
        active.update(&*self.db).await?;

        self.audit
            .record(
                SYSTEM_ACTOR,
                "Supplier",
                AuditAction::Delete,
                &format!("/api/v1/suppliers/{id}"),
                format!("Soft deleted supplier {id}"),
            )
            .await;
        Ok(true)
    }
}
