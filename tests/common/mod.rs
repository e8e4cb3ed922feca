#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::Database;

use cargohub_api::db::{self, DbPool};
use cargohub_api::entities::{Contact, HazardClassification, StockLine};
use cargohub_api::services::audit::AuditSink;
use cargohub_api::services::inventory::{InventoryData, InventoryService, PlacementData};
use cargohub_api::services::item_groups::ItemGroupService;
use cargohub_api::services::item_lines::ItemLineService;
use cargohub_api::services::item_types::ItemTypeService;
use cargohub_api::services::locations::{LocationData, LocationService};
use cargohub_api::services::orders::{OrderData, OrderService};
use cargohub_api::services::reports::ReportingService;
use cargohub_api::services::shipments::{ShipmentData, ShipmentService};
use cargohub_api::services::transfers::TransferService;
use cargohub_api::services::warehouses::{WarehouseData, WarehouseService};

pub struct TestApp {
    pub db: Arc<DbPool>,
    pub audit: AuditSink,
    pub warehouses: WarehouseService,
    pub locations: LocationService,
    pub inventory: InventoryService,
    pub orders: OrderService,
    pub shipments: ShipmentService,
    pub transfers: TransferService,
    pub item_groups: ItemGroupService,
    pub item_lines: ItemLineService,
    pub item_types: ItemTypeService,
    pub reports: ReportingService,
}

/// Fresh in-memory database with the full schema and service stack.
pub async fn setup() -> TestApp {
    let db = Arc::new(
        Database::connect("sqlite::memory:")
            .await
            .expect("connect in-memory sqlite"),
    );
    db::init_schema(&db).await.expect("create schema");

    let audit = AuditSink::new(db.clone());
    TestApp {
        warehouses: WarehouseService::new(db.clone(), audit.clone()),
        locations: LocationService::new(db.clone(), audit.clone()),
        inventory: InventoryService::new(db.clone(), audit.clone()),
        orders: OrderService::new(db.clone(), audit.clone()),
        shipments: ShipmentService::new(db.clone(), audit.clone()),
        transfers: TransferService::new(db.clone(), audit.clone()),
        item_groups: ItemGroupService::new(db.clone(), audit.clone()),
        item_lines: ItemLineService::new(db.clone(), audit.clone()),
        item_types: ItemTypeService::new(db.clone(), audit.clone()),
        reports: ReportingService::new(db.clone()),
        audit,
        db,
    }
}

pub fn warehouse_data(code: &str, hazard: HazardClassification) -> WarehouseData {
    WarehouseData {
        code: Some(code.to_string()),
        name: Some(format!("Warehouse {code}")),
        address: Some("Wijnhaven 107".to_string()),
        zip: None,
        city: Some("Rotterdam".to_string()),
        province: None,
        country: Some("NL".to_string()),
        hazard_classification: hazard,
        contact: Contact::default(),
    }
}

pub fn location_data(warehouse_id: i32, code: &str) -> LocationData {
    LocationData {
        warehouse_id,
        code: Some(code.to_string()),
        name: Some(format!("Row {code}")),
    }
}

pub fn inventory_data(item_id: &str, hazard: HazardClassification) -> InventoryData {
    InventoryData {
        item_id: Some(item_id.to_string()),
        description: Some(format!("Inventory for {item_id}")),
        item_reference: None,
        hazard_classification: hazard,
        total_on_hand: 10,
        total_expected: 0,
        total_ordered: 0,
        total_allocated: 0,
        total_available: 10,
    }
}

pub fn placement(inventory_id: i32, location_id: i32, quantity: i32) -> PlacementData {
    PlacementData {
        inventory_id,
        location_id,
        quantity,
    }
}

pub fn order_data(
    warehouse_id: i32,
    order_date: DateTime<Utc>,
    total_amount: Decimal,
    items: Vec<StockLine>,
) -> OrderData {
    OrderData {
        source_id: 1,
        order_date,
        request_date: order_date,
        reference: Some("ORD-TEST".to_string()),
        reference_extra: None,
        order_status: Some("Pending".to_string()),
        notes: None,
        shipping_notes: None,
        picking_notes: None,
        warehouse_id,
        ship_to: None,
        bill_to: None,
        shipment_id: None,
        total_amount,
        total_discount: Decimal::ZERO,
        total_tax: Decimal::ZERO,
        total_surcharge: Decimal::ZERO,
        items,
    }
}

pub fn shipment_data(order_id: i32, items: Vec<StockLine>) -> ShipmentData {
    let now = Utc::now();
    ShipmentData {
        order_id,
        source_id: 1,
        order_date: now,
        request_date: now,
        shipment_date: now,
        shipment_type: Some("O".to_string()),
        shipment_status: Some("Pending".to_string()),
        notes: None,
        carrier_code: Some("PostNL".to_string()),
        carrier_description: None,
        service_code: None,
        payment_type: None,
        transfer_mode: None,
        total_package_count: 1,
        total_package_weight: Decimal::ZERO,
        items,
    }
}

pub fn line(item_id: &str, quantity: i32) -> StockLine {
    StockLine {
        item_id: item_id.to_string(),
        quantity,
    }
}
