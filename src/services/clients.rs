use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::client::{self, Entity as ClientEntity};
use crate::entities::{AuditAction, HazardClassification};
use crate::errors::ServiceError;
use crate::services::audit::{AuditSink, SYSTEM_ACTOR};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ClientData {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub zip_code: Option<String>,
    pub province: Option<String>,
    pub country: Option<String>,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    #[validate(email(message = "contact_email must be a valid address"))]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub hazard_classification: HazardClassification,
}

#[derive(Clone)]
pub struct ClientService {
    db: Arc<DbPool>,
    audit: AuditSink,
}

impl ClientService {
    pub fn new(db: Arc<DbPool>, audit: AuditSink) -> Self {
        Self { db, audit }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, limit: Option<u64>) -> Result<Vec<client::Model>, ServiceError> {
        let mut query = ClientEntity::find().filter(client::Column::IsDeleted.eq(false));
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        Ok(query.all(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<client::Model>, ServiceError> {
        Ok(ClientEntity::find()
            .filter(client::Column::IsDeleted.eq(false))
            .filter(client::Column::Id.eq(id))
            .one(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get_any(&self, id: i32) -> Result<Option<client::Model>, ServiceError> {
        Ok(ClientEntity::find_by_id(id).one(&*self.db).await?)
    }

    #[instrument(skip(self, data))]
    pub async fn create(&self, data: ClientData) -> Result<client::Model, ServiceError> {
        data.validate()?;
        let now = Utc::now();

        let model = client::ActiveModel {
            name: Set(data.name),
            address: Set(data.address),
            city: Set(data.city),
            zip_code: Set(data.zip_code),
            province: Set(data.province),
            country: Set(data.country),
            contact_name: Set(data.contact_name),
            contact_phone: Set(data.contact_phone),
            contact_email: Set(data.contact_email),
            hazard_classification: Set(data.hazard_classification),
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
                "Client",
                AuditAction::Create,
                "/api/v1/clients",
                format!("Created client {}", model.id),
            )
            .await;
        Ok(model)
    }

    #[instrument(skip(self, data))]
    pub async fn update(
        &self,
        id: i32,
        data: ClientData,
    ) -> Result<Option<client::Model>, ServiceError> {
        data.validate()?;

        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: client::ActiveModel = existing.into();
        active.name = Set(data.name);
        active.address = Set(data.address);
        active.city = Set(data.city);
        active.zip_code = Set(data.zip_code);
        active.province = Set(data.province);
        active.country = Set(data.country);
        active.contact_name = Set(data.contact_name);
        active.contact_phone = Set(data.contact_phone);
        active.contact_email = Set(data.contact_email);
        active.hazard_classification = Set(data.hazard_classification);
        active.updated_at = Set(Utc::now());

        let model = active.update(&*self.db).await?;
        self.audit
            .record(
                SYSTEM_ACTOR,
                "Client",
                AuditAction::Update,
                &format!("/api/v1/clients/{id}"),
                format!("Updated client {id}"),
            )
            .await;
        Ok(Some(model))
    }

    #[instrument(skip(self))]
    pub async fn soft_delete(&self, id: i32) -> Result<bool, ServiceError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(false);
        };

        let mut active: client::ActiveModel = existing.into();
        active.is_deleted = Set(true);
        active.updated_at = Set(Utc::now());
        active.update(&*self.db).await?;

        self.audit
            .record(
                SYSTEM_ACTOR,
                "Client",
                AuditAction::Delete,
                &format!("/api/v1/clients/{id}"),
                format!("Soft deleted client {id}"),
            )
            .await;
        Ok(true)
    }
}
