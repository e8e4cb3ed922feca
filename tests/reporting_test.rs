mod common;

use assert_matches::assert_matches;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set};

use cargohub_api::entities::{order, HazardClassification};
use cargohub_api::errors::ServiceError;

use common::{line, order_data, setup, warehouse_data, TestApp};

/// Inserts an order row directly so `created_at` can land outside the
/// service-stamped "now".
async fn insert_order_created_at(
    app: &TestApp,
    warehouse_id: i32,
    created_at: DateTime<Utc>,
    total_amount: Decimal,
) {
    order::ActiveModel {
        source_id: Set(1),
        order_date: Set(created_at),
        request_date: Set(created_at),
        warehouse_id: Set(warehouse_id),
        total_amount: Set(total_amount),
        total_discount: Set(Decimal::ZERO),
        total_tax: Set(Decimal::ZERO),
        total_surcharge: Set(Decimal::ZERO),
        created_at: Set(created_at),
        updated_at: Set(created_at),
        is_deleted: Set(false),
        ..Default::default()
    }
    .insert(&*app.db)
    .await
    .unwrap();
}

#[tokio::test]
async fn warehouse_report_counts_orders_and_sums_lines() {
    let app = setup().await;
    let warehouse = app
        .warehouses
        .create(warehouse_data("WH-A", HazardClassification::Low))
        .await
        .unwrap();

    app.orders
        .create(order_data(
            warehouse.id,
            Utc::now(),
            Decimal::ZERO,
            vec![line("P000001", 4), line("P000002", 6)],
        ))
        .await
        .unwrap();
    app.orders
        .create(order_data(
            warehouse.id,
            Utc::now(),
            Decimal::ZERO,
            vec![line("P000003", 5)],
        ))
        .await
        .unwrap();

    let report = app.reports.warehouse_report(warehouse.id).await.unwrap();
    assert_eq!(report.total_orders, 2);
    assert_eq!(report.total_items, 15);
}

#[tokio::test]
async fn warehouse_report_excludes_soft_deleted_orders() {
    let app = setup().await;
    let warehouse = app
        .warehouses
        .create(warehouse_data("WH-B", HazardClassification::Low))
        .await
        .unwrap();

    let kept = app
        .orders
        .create(order_data(
            warehouse.id,
            Utc::now(),
            Decimal::ZERO,
            vec![line("P000001", 3)],
        ))
        .await
        .unwrap();
    let dropped = app
        .orders
        .create(order_data(
            warehouse.id,
            Utc::now(),
            Decimal::ZERO,
            vec![line("P000002", 100)],
        ))
        .await
        .unwrap();
    app.orders.soft_delete(dropped.order.id).await.unwrap();

    let report = app.reports.warehouse_report(warehouse.id).await.unwrap();
    assert_eq!(report.total_orders, 1);
    assert_eq!(report.total_items, 3);
    assert_eq!(kept.items[0].quantity, 3);
}

#[tokio::test]
async fn warehouse_report_for_unknown_warehouse_is_not_found() {
    let app = setup().await;

    let result = app.reports.warehouse_report(42).await;
    assert_matches!(result, Err(ServiceError::NotFound(_)));
}

#[tokio::test]
async fn empty_warehouse_reports_zero() {
    let app = setup().await;
    let warehouse = app
        .warehouses
        .create(warehouse_data("WH-C", HazardClassification::Low))
        .await
        .unwrap();

    let report = app.reports.warehouse_report(warehouse.id).await.unwrap();
    assert_eq!(report.total_orders, 0);
    assert_eq!(report.total_items, 0);
}

#[tokio::test]
async fn revenue_window_filters_on_creation_time_and_rounds() {
    let app = setup().await;
    let warehouse = app
        .warehouses
        .create(warehouse_data("WH-D", HazardClassification::Low))
        .await
        .unwrap();

    let now = Utc::now();
    app.orders
        .create(order_data(
            warehouse.id,
            now,
            Decimal::new(10_333, 3), // 10.333
            vec![],
        ))
        .await
        .unwrap();
    app.orders
        .create(order_data(
            warehouse.id,
            now,
            Decimal::new(20_002, 3), // 20.002
            vec![],
        ))
        .await
        .unwrap();
    // Created outside the window; must not count no matter its dates.
    insert_order_created_at(
        &app,
        warehouse.id,
        now - Duration::days(30),
        Decimal::new(99_999, 3),
    )
    .await;

    let summary = app
        .reports
        .revenue_between(now - Duration::days(1), now + Duration::days(1))
        .await
        .unwrap();

    assert_eq!(summary.total_orders, 2);
    // 10.333 + 20.002 = 30.335 -> 30.34 (banker's rounding rounds half to even)
    assert_eq!(summary.total_revenue, Decimal::new(3034, 2));
}

#[tokio::test]
async fn backdated_order_counts_in_its_creation_window() {
    let app = setup().await;
    let warehouse = app
        .warehouses
        .create(warehouse_data("WH-F", HazardClassification::Low))
        .await
        .unwrap();

    // order_date is a month back, but the row is created now.
    let now = Utc::now();
    app.orders
        .create(order_data(
            warehouse.id,
            now - Duration::days(30),
            Decimal::new(1200, 2),
            vec![],
        ))
        .await
        .unwrap();

    let summary = app
        .reports
        .revenue_between(now - Duration::days(1), now + Duration::days(1))
        .await
        .unwrap();
    assert_eq!(summary.total_orders, 1);
    assert_eq!(summary.total_revenue, Decimal::new(1200, 2));

    // The month-old window around order_date matches nothing.
    let summary = app
        .reports
        .revenue_between(now - Duration::days(31), now - Duration::days(29))
        .await
        .unwrap();
    assert_eq!(summary.total_orders, 0);
}

#[tokio::test]
async fn revenue_excludes_soft_deleted_orders() {
    let app = setup().await;
    let warehouse = app
        .warehouses
        .create(warehouse_data("WH-E", HazardClassification::Low))
        .await
        .unwrap();

    let now = Utc::now();
    app.orders
        .create(order_data(warehouse.id, now, Decimal::new(500, 2), vec![]))
        .await
        .unwrap();
    let deleted = app
        .orders
        .create(order_data(warehouse.id, now, Decimal::new(9900, 2), vec![]))
        .await
        .unwrap();
    app.orders.soft_delete(deleted.order.id).await.unwrap();

    let summary = app
        .reports
        .revenue_between(now - Duration::days(1), now + Duration::days(1))
        .await
        .unwrap();

    assert_eq!(summary.total_orders, 1);
    assert_eq!(summary.total_revenue, Decimal::new(500, 2));
}
