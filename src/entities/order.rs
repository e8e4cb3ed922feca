use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub source_id: i32,
    pub order_date: DateTimeUtc,
    pub request_date: DateTimeUtc,
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
    pub total_amount: Decimal,
    pub total_discount: Decimal,
    pub total_tax: Decimal,
    pub total_surcharge: Decimal,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub is_deleted: bool,
}

// Ledger lines attach through the (parent_kind, parent_id) pair on the
// stocks table, not through a SQL-level relation.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
