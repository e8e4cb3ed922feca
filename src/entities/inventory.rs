use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::hazard::HazardClassification;

/// Aggregate inventory record for one item reference.
///
/// The five total_* quantities are independently settable; the system does
/// not reconcile them against each other or against per-location placement
/// quantities.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub item_id: Option<String>,
    pub description: Option<String>,
    pub item_reference: Option<String>,
    pub hazard_classification: HazardClassification,
    pub total_on_hand: i32,
    pub total_expected: i32,
    pub total_ordered: i32,
    pub total_allocated: i32,
    pub total_available: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::inventory_location::Entity")]
    InventoryLocations,
}

impl Related<super::inventory_location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InventoryLocations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
