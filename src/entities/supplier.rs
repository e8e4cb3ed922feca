use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub code: Option<String>,
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
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::contact_person::Entity")]
    ContactPersons,
}

impl Related<super::contact_person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContactPersons.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
