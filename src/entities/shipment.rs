use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shipments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub order_id: i32,
    pub source_id: i32,
    pub order_date: DateTimeUtc,
    pub request_date: DateTimeUtc,
    pub shipment_date: DateTimeUtc,
    pub shipment_type: Option<String>,
    pub shipment_status: Option<String>,
    pub notes: Option<String>,
    pub carrier_code: Option<String>,
    pub carrier_description: Option<String>,
    pub service_code: Option<String>,
    pub payment_type: Option<String>,
    pub transfer_mode: Option<String>,
    pub total_package_count: i32,
    pub total_package_weight: Decimal,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
