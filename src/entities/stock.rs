use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Discriminator for the shared movement-ledger table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum StockParentKind {
    #[sea_orm(string_value = "order")]
    Order,
    #[sea_orm(string_value = "shipment")]
    Shipment,
    #[sea_orm(string_value = "transfer")]
    Transfer,
}

/// One movement-ledger line.
///
/// Every row belongs to exactly one parent, identified by the
/// (`parent_kind`, `parent_id`) pair. `item_id` is an opaque reference and
/// is deliberately not checked against the item store at write time.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stocks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub parent_kind: StockParentKind,
    pub parent_id: i32,
    pub item_id: String,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Typed reference to a ledger parent. Using a sum type here keeps "a line
/// belongs to exactly one parent kind" structural rather than conventional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerParent {
    Order(i32),
    Shipment(i32),
    Transfer(i32),
}

impl LedgerParent {
    pub fn kind(self) -> StockParentKind {
        match self {
            LedgerParent::Order(_) => StockParentKind::Order,
            LedgerParent::Shipment(_) => StockParentKind::Shipment,
            LedgerParent::Transfer(_) => StockParentKind::Transfer,
        }
    }

    pub fn id(self) -> i32 {
        match self {
            LedgerParent::Order(id) | LedgerParent::Shipment(id) | LedgerParent::Transfer(id) => id,
        }
    }
}

/// Item + quantity payload of a ledger line, as exchanged with callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLine {
    pub item_id: String,
    pub quantity: i32,
}

impl From<Model> for StockLine {
    fn from(model: Model) -> Self {
        Self {
            item_id: model.item_id,
            quantity: model.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_parent_maps_to_kind_and_id() {
        assert_eq!(LedgerParent::Order(7).kind(), StockParentKind::Order);
        assert_eq!(LedgerParent::Order(7).id(), 7);
        assert_eq!(LedgerParent::Shipment(9).kind(), StockParentKind::Shipment);
        assert_eq!(LedgerParent::Transfer(3).kind(), StockParentKind::Transfer);
        assert_eq!(LedgerParent::Transfer(3).id(), 3);
    }
}
