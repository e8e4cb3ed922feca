// Record keeping
pub mod clients;
pub mod contact_persons;
pub mod inventory;
pub mod item_groups;
pub mod item_lines;
pub mod item_types;
pub mod items;
pub mod locations;
pub mod suppliers;
pub mod warehouses;

// Movement ledger parents
pub mod orders;
pub mod shipments;
pub mod transfers;

// Shared ledger plumbing (crate-internal)
pub(crate) mod ledger;

// Cross-cutting
pub mod audit;
pub mod reports;
