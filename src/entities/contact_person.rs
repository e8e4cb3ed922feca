use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Which aggregate a contact person is attached to, if any.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ContactParentKind {
    #[sea_orm(string_value = "warehouse")]
    Warehouse,
    #[sea_orm(string_value = "client")]
    Client,
    #[sea_orm(string_value = "supplier")]
    Supplier,
}

/// A contact person attaches to at most one of warehouse, client or
/// supplier. The pair of nullable columns is only ever written through
/// [`ContactParent`], so the "at most one" rule cannot be violated by
/// construction.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contact_persons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: Option<String>,
    pub function: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub parent_kind: Option<ContactParentKind>,
    pub parent_id: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::warehouse::Entity",
        from = "Column::ParentId",
        to = "super::warehouse::Column::Id"
    )]
    Warehouse,
    #[sea_orm(
        belongs_to = "super::client::Entity",
        from = "Column::ParentId",
        to = "super::client::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::ParentId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
}

impl Related<super::warehouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warehouse.def()
    }
}

impl Related<super::client::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Tagged parent reference for a contact person.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ContactParent {
    #[default]
    Unattached,
    Warehouse(i32),
    Client(i32),
    Supplier(i32),
}

impl ContactParent {
    pub fn into_columns(self) -> (Option<ContactParentKind>, Option<i32>) {
        match self {
            ContactParent::Unattached => (None, None),
            ContactParent::Warehouse(id) => (Some(ContactParentKind::Warehouse), Some(id)),
            ContactParent::Client(id) => (Some(ContactParentKind::Client), Some(id)),
            ContactParent::Supplier(id) => (Some(ContactParentKind::Supplier), Some(id)),
        }
    }

    /// A kind without an id (or vice versa) has no meaning; both halves are
    /// required for an attachment.
    pub fn from_columns(kind: Option<ContactParentKind>, id: Option<i32>) -> Self {
        match (kind, id) {
            (Some(ContactParentKind::Warehouse), Some(id)) => ContactParent::Warehouse(id),
            (Some(ContactParentKind::Client), Some(id)) => ContactParent::Client(id),
            (Some(ContactParentKind::Supplier), Some(id)) => ContactParent::Supplier(id),
            _ => ContactParent::Unattached,
        }
    }
}

impl Model {
    pub fn parent(&self) -> ContactParent {
        ContactParent::from_columns(self.parent_kind, self.parent_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_round_trips_through_columns() {
        for parent in [
            ContactParent::Unattached,
            ContactParent::Warehouse(1),
            ContactParent::Client(2),
            ContactParent::Supplier(3),
        ] {
            let (kind, id) = parent.into_columns();
            assert_eq!(ContactParent::from_columns(kind, id), parent);
        }
    }

    #[test]
    fn half_specified_parent_is_unattached() {
        assert_eq!(
            ContactParent::from_columns(Some(ContactParentKind::Client), None),
            ContactParent::Unattached
        );
        assert_eq!(
            ContactParent::from_columns(None, Some(42)),
            ContactParent::Unattached
        );
    }
}
