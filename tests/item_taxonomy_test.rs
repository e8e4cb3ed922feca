mod common;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use cargohub_api::entities::audit_log::{self, Entity as AuditLogEntity};
use cargohub_api::entities::AuditAction;
use cargohub_api::services::item_groups::ItemGroupData;
use cargohub_api::services::item_lines::ItemLineData;
use cargohub_api::services::item_types::ItemTypeData;

use common::{setup, TestApp};

async fn audit_count(app: &TestApp, entity: &str, action: AuditAction) -> usize {
    AuditLogEntity::find()
        .filter(audit_log::Column::Entity.eq(entity))
        .filter(audit_log::Column::Action.eq(action))
        .all(&*app.db)
        .await
        .unwrap()
        .len()
}

fn group(name: &str) -> ItemGroupData {
    ItemGroupData {
        name: Some(name.to_string()),
        description: Some(format!("{name} goods")),
    }
}

#[tokio::test]
async fn item_group_crud_round_trip() {
    let app = setup().await;

    let created = app.item_groups.create(group("Electronics")).await.unwrap();
    assert_eq!(created.name.as_deref(), Some("Electronics"));
    assert!(!created.is_deleted);

    let fetched = app.item_groups.get(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, created.id);

    let updated = app
        .item_groups
        .update(
            created.id,
            ItemGroupData {
                name: Some("Appliances".to_string()),
                description: None,
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name.as_deref(), Some("Appliances"));
    assert!(updated.description.is_none());
    assert!(updated.updated_at >= created.updated_at);

    assert_eq!(audit_count(&app, "ItemGroup", AuditAction::Create).await, 1);
    assert_eq!(audit_count(&app, "ItemGroup", AuditAction::Update).await, 1);
}

#[tokio::test]
async fn soft_deleted_item_group_hidden_but_reachable_via_get_any() {
    let app = setup().await;

    let created = app.item_groups.create(group("Chemicals")).await.unwrap();
    assert!(app.item_groups.soft_delete(created.id).await.unwrap());
    assert!(!app.item_groups.soft_delete(created.id).await.unwrap());

    assert!(app.item_groups.get(created.id).await.unwrap().is_none());
    assert!(app.item_groups.list(None).await.unwrap().is_empty());

    let raw = app.item_groups.get_any(created.id).await.unwrap().unwrap();
    assert!(raw.is_deleted);

    assert_eq!(audit_count(&app, "ItemGroup", AuditAction::Delete).await, 1);
}

#[tokio::test]
async fn item_group_rejects_empty_name() {
    let app = setup().await;

    let result = app
        .item_groups
        .create(ItemGroupData {
            name: Some(String::new()),
            description: None,
        })
        .await;
    assert!(result.is_err());
    assert_eq!(audit_count(&app, "ItemGroup", AuditAction::Create).await, 0);
}

#[tokio::test]
async fn item_line_crud_and_soft_delete() {
    let app = setup().await;

    let created = app
        .item_lines
        .create(ItemLineData {
            name: Some("Home Appliances".to_string()),
            description: None,
        })
        .await
        .unwrap();

    let listed = app.item_lines.list(None).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);

    assert!(app.item_lines.soft_delete(created.id).await.unwrap());
    assert!(app.item_lines.list(None).await.unwrap().is_empty());

    assert_eq!(audit_count(&app, "ItemLine", AuditAction::Create).await, 1);
    assert_eq!(audit_count(&app, "ItemLine", AuditAction::Delete).await, 1);
}

#[tokio::test]
async fn item_type_update_of_unknown_id_is_miss() {
    let app = setup().await;

    let missing = app
        .item_types
        .update(
            999,
            ItemTypeData {
                name: Some("Desktop".to_string()),
                description: None,
            },
        )
        .await
        .unwrap();
    assert!(missing.is_none());
    assert_eq!(audit_count(&app, "ItemType", AuditAction::Update).await, 0);

    let created = app
        .item_types
        .create(ItemTypeData {
            name: Some("Laptop".to_string()),
            description: Some("Portable computers".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(
        app.item_types.get(created.id).await.unwrap().unwrap().name.as_deref(),
        Some("Laptop")
    );
}

#[tokio::test]
async fn taxonomy_list_respects_limit() {
    let app = setup().await;

    for name in ["Stationery", "Furniture", "Toys"] {
        app.item_groups.create(group(name)).await.unwrap();
    }

    assert_eq!(app.item_groups.list(Some(2)).await.unwrap().len(), 2);
    assert_eq!(app.item_groups.list(None).await.unwrap().len(), 3);
}
