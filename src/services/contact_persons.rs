use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::db::DbPool;
use crate::entities::contact_person::{self, ContactParent, Entity as ContactPersonEntity};
use crate::entities::AuditAction;
use crate::errors::ServiceError;
use crate::services::audit::{AuditSink, SYSTEM_ACTOR};

/// Full field set for a contact person. The parent is a tagged value, so
/// "attached to at most one aggregate" holds by construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ContactPersonData {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub function: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    #[serde(default)]
    pub parent: ContactParent,
}

#[derive(Clone)]
pub struct ContactPersonService {
    db: Arc<DbPool>,
    audit: AuditSink,
}

impl ContactPersonService {
    pub fn new(db: Arc<DbPool>, audit: AuditSink) -> Self {
        Self { db, audit }
    }

    #[instrument(skip(self))]
    pub async fn list(
        &self,
        limit: Option<u64>,
    ) -> Result<Vec<contact_person::Model>, ServiceError> {
        let mut query =
            ContactPersonEntity::find().filter(contact_person::Column::IsDeleted.eq(false));
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        Ok(query.all(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<contact_person::Model>, ServiceError> {
        Ok(ContactPersonEntity::find()
            .filter(contact_person::Column::IsDeleted.eq(false))
            .filter(contact_person::Column::Id.eq(id))
            .one(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get_any(&self, id: i32) -> Result<Option<contact_person::Model>, ServiceError> {
        Ok(ContactPersonEntity::find_by_id(id).one(&*self.db).await?)
    }

    #[instrument(skip(self, data))]
    pub async fn create(
        &self,
        data: ContactPersonData,
    ) -> Result<contact_person::Model, ServiceError> {
        data.validate()?;
        let now = Utc::now();
        let (parent_kind, parent_id) = data.parent.into_columns();

        let model = contact_person::ActiveModel {
            name: Set(data.name),
            function: Set(data.function),
            phone: Set(data.phone),
            email: Set(data.email),
            parent_kind: Set(parent_kind),
            parent_id: Set(parent_id),
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
                "ContactPerson",
                AuditAction::Create,
                "/api/v1/contact-persons",
                format!("Created contact person {}", model.id),
            )
            .await;
        Ok(model)
    }

    #[instrument(skip(self, data))]
    pub async fn update(
        &self,
        id: i32,
        data: ContactPersonData,
    ) -> Result<Option<contact_person::Model>, ServiceError> {
        data.validate()?;

        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let (parent_kind, parent_id) = data.parent.into_columns();
        let mut active: contact_person::ActiveModel = existing.into();
        active.name = Set(data.name);
        active.function = Set(data.function);
        active.phone = Set(data.phone);
        active.email = Set(data.email);
        active.parent_kind = Set(parent_kind);
        active.parent_id = Set(parent_id);
        active.updated_at = Set(Utc::now());

        let model = active.update(&*self.db).await?;
        self.audit
            .record(
                SYSTEM_ACTOR,
                "ContactPerson",
                AuditAction::Update,
                &format!("/api/v1/contact-persons/{id}"),
                format!("Updated contact person {id}"),
            )
            .await;
        Ok(Some(model))
    }

    #[instrument(skip(self))]
    pub async fn soft_delete(&self, id: i32) -> Result<bool, ServiceError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(false);
        };

        let mut active: contact_person::ActiveModel = existing.into();
        active.is_deleted = Set(true);
        active.updated_at = Set(Utc::now());
        active.update(&*self.db).await?;

        self.audit
            .record(
                SYSTEM_ACTOR,
                "ContactPerson",
                AuditAction::Delete,
                &format!("/api/v1/contact-persons/{id}"),
                format!("Soft deleted contact person {id}"),
            )
            .await;
        Ok(true)
    }
}
