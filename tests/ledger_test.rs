mod common;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use cargohub_api::entities::stock::{self, Entity as StockEntity};
use cargohub_api::entities::{HazardClassification, StockParentKind};
use cargohub_api::services::transfers::TransferData;

use common::{line, order_data, setup, shipment_data, warehouse_data};

#[tokio::test]
async fn create_attaches_lines_and_get_loads_them() {
    let app = setup().await;
    let warehouse = app
        .warehouses
        .create(warehouse_data("WH-A", HazardClassification::Low))
        .await
        .unwrap();

    let created = app
        .orders
        .create(order_data(
            warehouse.id,
            Utc::now(),
            Decimal::new(10000, 2),
            vec![line("P000001", 4), line("P000002", 7)],
        ))
        .await
        .unwrap();

    let fetched = app.orders.get(created.order.id).await.unwrap().unwrap();
    assert_eq!(fetched.items.len(), 2);
    assert_eq!(fetched.items[0].item_id, "P000001");
    assert_eq!(fetched.items[0].quantity, 4);
    assert_eq!(fetched.items[1].item_id, "P000002");
    assert_eq!(fetched.items[1].quantity, 7);
}

#[tokio::test]
async fn update_replaces_line_set_wholesale() {
    let app = setup().await;
    let warehouse = app
        .warehouses
        .create(warehouse_data("WH-B", HazardClassification::Low))
        .await
        .unwrap();

    let created = app
        .orders
        .create(order_data(
            warehouse.id,
            Utc::now(),
            Decimal::ZERO,
            vec![line("P000001", 1), line("P000002", 2), line("P000003", 3)],
        ))
        .await
        .unwrap();

    // Replace three lines with two; P000002 is gone, P000001 changes.
    let updated = app
        .orders
        .update(
            created.order.id,
            order_data(
                warehouse.id,
                Utc::now(),
                Decimal::ZERO,
                vec![line("P000001", 9), line("P000004", 5)],
            ),
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.items.len(), 2);

    let fetched = app.orders.get(created.order.id).await.unwrap().unwrap();
    assert_eq!(fetched.items.len(), 2);
    assert!(fetched.items.iter().all(|l| l.item_id != "P000002"));
    let first = fetched
        .items
        .iter()
        .find(|l| l.item_id == "P000001")
        .unwrap();
    assert_eq!(first.quantity, 9);
}

#[tokio::test]
async fn update_with_empty_list_clears_lines() {
    let app = setup().await;
    let warehouse = app
        .warehouses
        .create(warehouse_data("WH-C", HazardClassification::Low))
        .await
        .unwrap();

    let created = app
        .orders
        .create(order_data(
            warehouse.id,
            Utc::now(),
            Decimal::ZERO,
            vec![line("P000001", 1)],
        ))
        .await
        .unwrap();

    app.orders
        .update(
            created.order.id,
            order_data(warehouse.id, Utc::now(), Decimal::ZERO, vec![]),
        )
        .await
        .unwrap()
        .unwrap();

    let fetched = app.orders.get(created.order.id).await.unwrap().unwrap();
    assert!(fetched.items.is_empty());
}

#[tokio::test]
async fn lines_are_scoped_per_parent_kind() {
    let app = setup().await;
    let warehouse = app
        .warehouses
        .create(warehouse_data("WH-D", HazardClassification::Low))
        .await
        .unwrap();

    // First order and first shipment share the numeric id 1; their lines
    // must not bleed into each other.
    let order = app
        .orders
        .create(order_data(
            warehouse.id,
            Utc::now(),
            Decimal::ZERO,
            vec![line("ORDER-ITEM", 11)],
        ))
        .await
        .unwrap();
    let shipment = app
        .shipments
        .create(shipment_data(order.order.id, vec![line("SHIP-ITEM", 22)]))
        .await
        .unwrap();

    assert_eq!(order.order.id, shipment.shipment.id);

    let order = app.orders.get(order.order.id).await.unwrap().unwrap();
    let shipment = app.shipments.get(shipment.shipment.id).await.unwrap().unwrap();

    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].item_id, "ORDER-ITEM");
    assert_eq!(shipment.items.len(), 1);
    assert_eq!(shipment.items[0].item_id, "SHIP-ITEM");
}

#[tokio::test]
async fn transfer_lines_use_their_own_kind() {
    let app = setup().await;

    let transfer = app
        .transfers
        .create(TransferData {
            reference: Some("TR00001".to_string()),
            transfer_from: None,
            transfer_to: Some(1),
            transfer_status: Some("Scheduled".to_string()),
            items: vec![line("P000009", 3)],
        })
        .await
        .unwrap();

    let rows = StockEntity::find()
        .filter(stock::Column::ParentKind.eq(StockParentKind::Transfer))
        .filter(stock::Column::ParentId.eq(transfer.transfer.id))
        .all(&*app.db)
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].item_id, "P000009");
    assert_eq!(rows[0].quantity, 3);
}

#[tokio::test]
async fn soft_delete_leaves_ledger_rows_in_place() {
    let app = setup().await;
    let warehouse = app
        .warehouses
        .create(warehouse_data("WH-E", HazardClassification::Low))
        .await
        .unwrap();

    let created = app
        .orders
        .create(order_data(
            warehouse.id,
            Utc::now(),
            Decimal::ZERO,
            vec![line("P000001", 2)],
        ))
        .await
        .unwrap();

    assert!(app.orders.soft_delete(created.order.id).await.unwrap());
    assert!(app.orders.get(created.order.id).await.unwrap().is_none());

    let rows = StockEntity::find()
        .filter(stock::Column::ParentKind.eq(StockParentKind::Order))
        .filter(stock::Column::ParentId.eq(created.order.id))
        .all(&*app.db)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}
