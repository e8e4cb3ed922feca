mod common;

use assert_matches::assert_matches;
use rstest::rstest;

use cargohub_api::entities::HazardClassification;
use cargohub_api::errors::ServiceError;

use common::{inventory_data, location_data, placement, setup, warehouse_data};

#[rstest]
#[case(HazardClassification::None, HazardClassification::Low)]
#[case(HazardClassification::Low, HazardClassification::Medium)]
#[case(HazardClassification::Medium, HazardClassification::High)]
#[case(HazardClassification::High, HazardClassification::Severe)]
fn classification_order_is_strict(
    #[case] lower: HazardClassification,
    #[case] higher: HazardClassification,
) {
    assert!(higher > lower);
    assert!(!(lower > higher));
}

#[tokio::test]
async fn higher_classified_inventory_is_flagged() {
    let app = setup().await;

    let warehouse = app
        .warehouses
        .create(warehouse_data("WH-A", HazardClassification::Low))
        .await
        .unwrap();
    let location = app
        .locations
        .create(location_data(warehouse.id, "A.1.0"))
        .await
        .unwrap();
    let inventory = app
        .inventory
        .create(inventory_data("P000001", HazardClassification::Severe))
        .await
        .unwrap();
    app.inventory
        .add_inventory_location(placement(inventory.id, location.id, 5))
        .await
        .unwrap();

    let report = app
        .warehouses
        .check_hazard_compliance(warehouse.id)
        .await
        .unwrap();

    assert!(!report.compliant);
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].id, inventory.id);
}

#[tokio::test]
async fn equal_classification_is_compliant() {
    let app = setup().await;

    let warehouse = app
        .warehouses
        .create(warehouse_data("WH-B", HazardClassification::Low))
        .await
        .unwrap();
    let location = app
        .locations
        .create(location_data(warehouse.id, "B.1.0"))
        .await
        .unwrap();
    let inventory = app
        .inventory
        .create(inventory_data("P000002", HazardClassification::Low))
        .await
        .unwrap();
    app.inventory
        .add_inventory_location(placement(inventory.id, location.id, 5))
        .await
        .unwrap();

    let report = app
        .warehouses
        .check_hazard_compliance(warehouse.id)
        .await
        .unwrap();

    assert!(report.compliant);
    assert!(report.violations.is_empty());
}

#[tokio::test]
async fn inventory_placed_twice_is_reported_once() {
    let app = setup().await;

    let warehouse = app
        .warehouses
        .create(warehouse_data("WH-C", HazardClassification::None))
        .await
        .unwrap();
    let loc_a = app
        .locations
        .create(location_data(warehouse.id, "C.1.0"))
        .await
        .unwrap();
    let loc_b = app
        .locations
        .create(location_data(warehouse.id, "C.2.0"))
        .await
        .unwrap();
    let inventory = app
        .inventory
        .create(inventory_data("P000003", HazardClassification::High))
        .await
        .unwrap();
    app.inventory
        .add_inventory_location(placement(inventory.id, loc_a.id, 3))
        .await
        .unwrap();
    app.inventory
        .add_inventory_location(placement(inventory.id, loc_b.id, 7))
        .await
        .unwrap();

    let report = app
        .warehouses
        .check_hazard_compliance(warehouse.id)
        .await
        .unwrap();

    assert_eq!(report.violations.len(), 1);
}

#[tokio::test]
async fn inventory_in_another_warehouse_is_ignored() {
    let app = setup().await;

    let checked = app
        .warehouses
        .create(warehouse_data("WH-D", HazardClassification::Low))
        .await
        .unwrap();
    let other = app
        .warehouses
        .create(warehouse_data("WH-E", HazardClassification::Low))
        .await
        .unwrap();
    let other_loc = app
        .locations
        .create(location_data(other.id, "E.1.0"))
        .await
        .unwrap();
    let inventory = app
        .inventory
        .create(inventory_data("P000004", HazardClassification::Severe))
        .await
        .unwrap();
    app.inventory
        .add_inventory_location(placement(inventory.id, other_loc.id, 2))
        .await
        .unwrap();

    let report = app
        .warehouses
        .check_hazard_compliance(checked.id)
        .await
        .unwrap();

    assert!(report.compliant);
}

#[tokio::test]
async fn missing_warehouse_is_not_found() {
    let app = setup().await;

    let result = app.warehouses.check_hazard_compliance(999).await;
    assert_matches!(result, Err(ServiceError::NotFound(_)));
}

#[tokio::test]
async fn soft_deleted_warehouse_is_not_found() {
    let app = setup().await;

    let warehouse = app
        .warehouses
        .create(warehouse_data("WH-F", HazardClassification::Medium))
        .await
        .unwrap();
    assert!(app.warehouses.soft_delete(warehouse.id).await.unwrap());

    let result = app.warehouses.check_hazard_compliance(warehouse.id).await;
    assert_matches!(result, Err(ServiceError::NotFound(_)));
}
