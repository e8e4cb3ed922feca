use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub uid: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub upc_code: Option<String>,
    pub model_number: Option<String>,
    pub commodity_code: Option<String>,
    pub item_line: Option<i32>,
    pub item_group: Option<i32>,
    pub item_type: Option<i32>,
    pub unit_purchase_quantity: i32,
    pub unit_order_quantity: i32,
    pub pack_order_quantity: i32,
    pub supplier_id: Option<i32>,
    pub supplier_code: Option<String>,
    pub supplier_part_number: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
