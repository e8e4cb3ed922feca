use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use sea_orm::Database;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use cargohub_api::{config::AppConfig, db, AppState};

async fn test_router() -> Router {
    let conn = Database::connect("sqlite::memory:")
        .await
        .expect("connect in-memory sqlite");
    db::init_schema(&conn).await.expect("create schema");

    let cfg = AppConfig {
        database_url: "sqlite::memory:".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        log_level: "warn".to_string(),
        log_json: false,
        default_list_limit: 100,
        db_max_connections: 1,
        db_min_connections: 1,
        auto_migrate: true,
    };

    cargohub_api::app_router(AppState::new(Arc::new(conn), cfg))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_reports_database() {
    let app = test_router().await;

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "up");
}

#[tokio::test]
async fn create_then_get_warehouse() {
    let app = test_router().await;

    let create = Request::post("/api/v1/warehouses")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "code": "YQZZNL56",
                "name": "Heemskerk cargo hub",
                "city": "Heemskerk",
                "hazard_classification": "low"
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.clone().oneshot(create).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .oneshot(
            Request::get(format!("/api/v1/warehouses/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["code"], "YQZZNL56");
}

#[tokio::test]
async fn missing_warehouse_is_404() {
    let app = test_router().await;

    let response = app
        .oneshot(
            Request::get("/api/v1/warehouses/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn hazard_check_answers_200_even_when_empty() {
    let app = test_router().await;

    let create = Request::post("/api/v1/warehouses")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "code": "WH-1", "name": "Empty hub" }).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(create).await.unwrap();
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = app
        .oneshot(
            Request::get(format!("/api/v1/warehouses/{id}/hazard-check"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    assert_eq!(report["compliant"], true);
    assert_eq!(report["violations"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn placement_body_naming_another_inventory_is_422() {
    let app = test_router().await;

    let create = Request::post("/api/v1/warehouses")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "code": "WH-P", "name": "Placement hub" }).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(create).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let warehouse_id = body_json(response).await["id"].as_i64().unwrap();

    let create = Request::post("/api/v1/locations")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "warehouse_id": warehouse_id, "code": "A.1.0", "name": "Row A.1.0" })
                .to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(create).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let location_id = body_json(response).await["id"].as_i64().unwrap();

    let create = Request::post("/api/v1/inventories")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "item_id": "P000001", "description": "Widgets" }).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(create).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["id"].as_i64().unwrap();

    let mismatched = Request::post(format!("/api/v1/inventories/{id}/locations"))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "inventory_id": id + 1, "location_id": location_id, "quantity": 5 }).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(mismatched).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Omitting inventory_id defers to the path and goes through.
    let deferred = Request::post(format!("/api/v1/inventories/{id}/locations"))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "location_id": location_id, "quantity": 5 }).to_string(),
        ))
        .unwrap();
    let response = app.oneshot(deferred).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let placement = body_json(response).await;
    assert_eq!(placement["inventory_id"].as_i64().unwrap(), id);
}

#[tokio::test]
async fn invalid_payload_is_400() {
    let app = test_router().await;

    let create = Request::post("/api/v1/warehouses")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "code": "", "name": "x" }).to_string()))
        .unwrap();

    let response = app.oneshot(create).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
