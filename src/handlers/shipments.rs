use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};

use super::{AppState, ListQuery};
use crate::errors::ServiceError;
use crate::services::shipments::ShipmentData;

async fn list_shipments(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let shipments = state.shipments.list(query.limit).await?;
    Ok(Json(shipments))
}

async fn get_shipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let shipment = state
        .shipments
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Shipment {id} not found")))?;
    Ok(Json(shipment))
}

async fn create_shipment(
    State(state): State<AppState>,
    Json(data): Json<ShipmentData>,
) -> Result<impl IntoResponse, ServiceError> {
    let shipment = state.shipments.create(data).await?;
    Ok((StatusCode::CREATED, Json(shipment)))
}

async fn update_shipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<ShipmentData>,
) -> Result<impl IntoResponse, ServiceError> {
    let shipment = state
        .shipments
        .update(id, data)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Shipment {id} not found")))?;
    Ok(Json(shipment))
}

async fn delete_shipment(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    if state.shipments.soft_delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServiceError::NotFound(format!("Shipment {id} not found")))
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_shipments).post(create_shipment))
        .route(
            "/:id",
            get(get_shipment).put(update_shipment).delete(delete_shipment),
        )
}
