pub mod audit;
pub mod clients;
pub mod contact_persons;
pub mod health;
pub mod inventory;
pub mod item_groups;
pub mod item_lines;
pub mod item_types;
pub mod items;
pub mod locations;
pub mod orders;
pub mod reports;
pub mod shipments;
pub mod suppliers;
pub mod transfers;
pub mod warehouses;

use serde::Deserialize;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Common query parameters for list endpoints.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u64>,
}
