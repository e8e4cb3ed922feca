use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ordinal hazard tier shared by warehouses, clients and inventory.
///
/// Stored as its integer rank; a warehouse may only host inventory at or
/// below its own tier, so ordering of the variants is load-bearing.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(rename_all = "snake_case")]
pub enum HazardClassification {
    #[default]
    #[sea_orm(num_value = 0)]
    None,
    #[sea_orm(num_value = 1)]
    Low,
    #[sea_orm(num_value = 2)]
    Medium,
    #[sea_orm(num_value = 3)]
    High,
    #[sea_orm(num_value = 4)]
    Severe,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_follows_rank() {
        assert!(HazardClassification::None < HazardClassification::Low);
        assert!(HazardClassification::Low < HazardClassification::Medium);
        assert!(HazardClassification::Medium < HazardClassification::High);
        assert!(HazardClassification::High < HazardClassification::Severe);
    }

    #[test]
    fn default_is_unclassified() {
        assert_eq!(HazardClassification::default(), HazardClassification::None);
    }
}
