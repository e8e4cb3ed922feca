use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};

use super::{AppState, ListQuery};
use crate::errors::ServiceError;
use crate::services::warehouses::WarehouseData;

async fn list_warehouses(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let warehouses = state.warehouses.list(query.limit).await?;
    Ok(Json(warehouses))
}

async fn get_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let warehouse = state
        .warehouses
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Warehouse {id} not found")))?;
    Ok(Json(warehouse))
}

async fn create_warehouse(
    State(state): State<AppState>,
    Json(data): Json<WarehouseData>,
) -> Result<impl IntoResponse, ServiceError> {
    let warehouse = state.warehouses.create(data).await?;
    Ok((StatusCode::CREATED, Json(warehouse)))
}

async fn update_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<WarehouseData>,
) -> Result<impl IntoResponse, ServiceError> {
    let warehouse = state
        .warehouses
        .update(id, data)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Warehouse {id} not found")))?;
    Ok(Json(warehouse))
}

async fn delete_warehouse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    if state.warehouses.soft_delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServiceError::NotFound(format!("Warehouse {id} not found")))
    }
}

/// Advisory compliance read. A non-compliant warehouse still answers 200;
/// the verdict is carried in the body, not the status line.
async fn hazard_check(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let report = state.warehouses.check_hazard_compliance(id).await?;
    Ok(Json(report))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_warehouses).post(create_warehouse))
        .route(
            "/:id",
            get(get_warehouse)
                .put(update_warehouse)
                .delete(delete_warehouse),
        )
        .route("/:id/hazard-check", get(hazard_check))
}
