mod common;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use cargohub_api::entities::audit_log::{self, Entity as AuditLogEntity};
use cargohub_api::entities::{AuditAction, HazardClassification};

use common::{setup, warehouse_data, TestApp};

async fn audit_count(app: &TestApp, entity: &str, action: AuditAction) -> usize {
    AuditLogEntity::find()
        .filter(audit_log::Column::Entity.eq(entity))
        .filter(audit_log::Column::Action.eq(action))
        .all(&*app.db)
        .await
        .unwrap()
        .len()
}

#[tokio::test]
async fn deleted_rows_hidden_from_reads_but_reachable_via_get_any() {
    let app = setup().await;

    let warehouse = app
        .warehouses
        .create(warehouse_data("WH-A", HazardClassification::Low))
        .await
        .unwrap();
    assert!(app.warehouses.soft_delete(warehouse.id).await.unwrap());

    assert!(app.warehouses.get(warehouse.id).await.unwrap().is_none());
    assert!(app.warehouses.list(None).await.unwrap().is_empty());

    let raw = app
        .warehouses
        .get_any(warehouse.id)
        .await
        .unwrap()
        .unwrap();
    assert!(raw.is_deleted);
}

#[tokio::test]
async fn double_delete_returns_false_and_audits_once() {
    let app = setup().await;

    let warehouse = app
        .warehouses
        .create(warehouse_data("WH-B", HazardClassification::Low))
        .await
        .unwrap();

    assert!(app.warehouses.soft_delete(warehouse.id).await.unwrap());
    assert!(!app.warehouses.soft_delete(warehouse.id).await.unwrap());

    assert_eq!(audit_count(&app, "Warehouse", AuditAction::Delete).await, 1);
}

#[tokio::test]
async fn delete_of_unknown_id_writes_nothing() {
    let app = setup().await;

    assert!(!app.warehouses.soft_delete(999).await.unwrap());
    assert_eq!(audit_count(&app, "Warehouse", AuditAction::Delete).await, 0);
}

#[tokio::test]
async fn each_mutation_writes_one_audit_record() {
    let app = setup().await;

    let warehouse = app
        .warehouses
        .create(warehouse_data("WH-C", HazardClassification::Low))
        .await
        .unwrap();
    app.warehouses
        .update(warehouse.id, warehouse_data("WH-C2", HazardClassification::Medium))
        .await
        .unwrap()
        .unwrap();
    app.warehouses.soft_delete(warehouse.id).await.unwrap();

    assert_eq!(audit_count(&app, "Warehouse", AuditAction::Create).await, 1);
    assert_eq!(audit_count(&app, "Warehouse", AuditAction::Update).await, 1);
    assert_eq!(audit_count(&app, "Warehouse", AuditAction::Delete).await, 1);
}

#[tokio::test]
async fn recent_returns_newest_first() {
    let app = setup().await;

    app.warehouses
        .create(warehouse_data("WH-D", HazardClassification::Low))
        .await
        .unwrap();
    app.warehouses
        .create(warehouse_data("WH-E", HazardClassification::Low))
        .await
        .unwrap();

    let records = app.audit.recent(10).await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].id > records[1].id);
    assert_eq!(records[0].actor, "system");
}

#[tokio::test]
async fn update_of_deleted_row_is_a_miss() {
    let app = setup().await;

    let warehouse = app
        .warehouses
        .create(warehouse_data("WH-F", HazardClassification::Low))
        .await
        .unwrap();
    app.warehouses.soft_delete(warehouse.id).await.unwrap();

    let updated = app
        .warehouses
        .update(warehouse.id, warehouse_data("WH-F2", HazardClassification::Low))
        .await
        .unwrap();
    assert!(updated.is_none());
    assert_eq!(audit_count(&app, "Warehouse", AuditAction::Update).await, 0);
}
