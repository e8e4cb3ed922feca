use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Router,
};

use super::{AppState, ListQuery};
use crate::errors::ServiceError;
use crate::services::inventory::{InventoryData, PlacementData};

async fn list_inventories(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let inventories = state.inventory.list(query.limit).await?;
    Ok(Json(inventories))
}

async fn get_inventory(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let inventory = state
        .inventory
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Inventory {id} not found")))?;
    Ok(Json(inventory))
}

async fn create_inventory(
    State(state): State<AppState>,
    Json(data): Json<InventoryData>,
) -> Result<impl IntoResponse, ServiceError> {
    let inventory = state.inventory.create(data).await?;
    Ok((StatusCode::CREATED, Json(inventory)))
}

async fn update_inventory(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<InventoryData>,
) -> Result<impl IntoResponse, ServiceError> {
    let inventory = state
        .inventory
        .update(id, data)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Inventory {id} not found")))?;
    Ok(Json(inventory))
}

async fn delete_inventory(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    if state.inventory.soft_delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServiceError::NotFound(format!("Inventory {id} not found")))
    }
}

async fn get_placements(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let placements = state.inventory.get_inventory_locations(id).await?;
    Ok(Json(placements))
}

async fn add_placement(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(mut data): Json<PlacementData>,
) -> Result<impl IntoResponse, ServiceError> {
    // A body naming a different inventory than the path is a caller bug,
    // not something to silently rebind.
    if data.inventory_id != 0 && data.inventory_id != id {
        return Err(ServiceError::InvalidOperation(format!(
            "placement body targets inventory {} but the path targets inventory {id}",
            data.inventory_id
        )));
    }
    data.inventory_id = id;
    let placement = state.inventory.add_inventory_location(data).await?;
    Ok((StatusCode::CREATED, Json(placement)))
}

async fn delete_placement(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    if state.inventory.soft_delete_inventory_location(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServiceError::NotFound(format!(
            "Inventory location {id} not found"
        )))
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inventories).post(create_inventory))
        .route(
            "/:id",
            get(get_inventory)
                .put(update_inventory)
                .delete(delete_inventory),
        )
        .route("/:id/locations", get(get_placements).post(add_placement))
}

/// Placement rows are deleted through their own flat prefix; they carry no
/// inventory id in the path.
pub fn placement_routes() -> Router<AppState> {
    Router::new().route("/:id", delete(delete_placement))
}
