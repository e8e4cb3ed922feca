//! CargoHub API Library
//!
//! Warehouse record keeping: warehouses, locations, inventories and their
//! placements, the order/shipment/transfer movement ledger, hazard
//! compliance checks, audit trail and reporting.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::db::DbPool;
use crate::services::audit::AuditSink;
use crate::services::clients::ClientService;
use crate::services::contact_persons::ContactPersonService;
use crate::services::inventory::InventoryService;
use crate::services::item_groups::ItemGroupService;
use crate::services::item_lines::ItemLineService;
use crate::services::item_types::ItemTypeService;
use crate::services::items::ItemService;
use crate::services::locations::LocationService;
use crate::services::orders::OrderService;
use crate::services::reports::ReportingService;
use crate::services::shipments::ShipmentService;
use crate::services::suppliers::SupplierService;
use crate::services::transfers::TransferService;
use crate::services::warehouses::WarehouseService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: config::AppConfig,
    pub audit: AuditSink,
    pub warehouses: WarehouseService,
    pub locations: LocationService,
    pub inventory: InventoryService,
    pub orders: OrderService,
    pub shipments: ShipmentService,
    pub transfers: TransferService,
    pub items: ItemService,
    pub item_groups: ItemGroupService,
    pub item_lines: ItemLineService,
    pub item_types: ItemTypeService,
    pub clients: ClientService,
    pub suppliers: SupplierService,
    pub contact_persons: ContactPersonService,
    pub reports: ReportingService,
}

impl AppState {
    pub fn new(db: Arc<DbPool>, config: config::AppConfig) -> Self {
        let audit = AuditSink::new(db.clone());
        Self {
            warehouses: WarehouseService::new(db.clone(), audit.clone()),
            locations: LocationService::new(db.clone(), audit.clone()),
            inventory: InventoryService::new(db.clone(), audit.clone()),
            orders: OrderService::new(db.clone(), audit.clone()),
            shipments: ShipmentService::new(db.clone(), audit.clone()),
            transfers: TransferService::new(db.clone(), audit.clone()),
            items: ItemService::new(db.clone(), audit.clone()),
            item_groups: ItemGroupService::new(db.clone(), audit.clone()),
            item_lines: ItemLineService::new(db.clone(), audit.clone()),
            item_types: ItemTypeService::new(db.clone(), audit.clone()),
            clients: ClientService::new(db.clone(), audit.clone()),
            suppliers: SupplierService::new(db.clone(), audit.clone()),
            contact_persons: ContactPersonService::new(db.clone(), audit.clone()),
            reports: ReportingService::new(db.clone()),
            audit,
            config,
            db,
        }
    }
}

/// Assembles the full application router.
pub fn app_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/warehouses", handlers::warehouses::routes())
        .nest("/locations", handlers::locations::routes())
        .nest("/inventories", handlers::inventory::routes())
        .nest("/inventory-locations", handlers::inventory::placement_routes())
        .nest("/orders", handlers::orders::routes())
        .nest("/shipments", handlers::shipments::routes())
        .nest("/transfers", handlers::transfers::routes())
        .nest("/items", handlers::items::routes())
        .nest("/item-groups", handlers::item_groups::routes())
        .nest("/item-lines", handlers::item_lines::routes())
        .nest("/item-types", handlers::item_types::routes())
        .nest("/clients", handlers::clients::routes())
        .nest("/suppliers", handlers::suppliers::routes())
        .nest("/contact-persons", handlers::contact_persons::routes())
        .nest("/reports", handlers::reports::routes())
        .nest("/audit", handlers::audit::routes());

    Router::new()
        .nest("/api/v1", api)
        .nest("/health", handlers::health::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .with_state(state)
}
