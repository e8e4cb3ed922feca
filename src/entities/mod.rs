pub mod audit_log;
pub mod client;
pub mod contact_person;
pub mod hazard;
pub mod inventory;
pub mod inventory_location;
pub mod item;
pub mod item_group;
pub mod item_line;
pub mod item_type;
pub mod location;
pub mod order;
pub mod shipment;
pub mod stock;
pub mod supplier;
pub mod transfer;
pub mod warehouse;

pub use audit_log::AuditAction;
pub use contact_person::{ContactParent, ContactParentKind};
pub use hazard::HazardClassification;
pub use stock::{LedgerParent, StockLine, StockParentKind};
pub use warehouse::Contact;
