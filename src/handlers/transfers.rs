use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};

use super::{AppState, ListQuery};
use crate::errors::ServiceError;
use crate::services::transfers::TransferData;

async fn list_transfers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let transfers = state.transfers.list(query.limit).await?;
    Ok(Json(transfers))
}

async fn get_transfer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let transfer = state
        .transfers
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Transfer {id} not found")))?;
    Ok(Json(transfer))
}

async fn create_transfer(
    State(state): State<AppState>,
    Json(data): Json<TransferData>,
) -> Result<impl IntoResponse, ServiceError> {
    let transfer = state.transfers.create(data).await?;
    Ok((StatusCode::CREATED, Json(transfer)))
}

async fn update_transfer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<TransferData>,
) -> Result<impl IntoResponse, ServiceError> {
    let transfer = state
        .transfers
        .update(id, data)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Transfer {id} not found")))?;
    Ok(Json(transfer))
}

async fn delete_transfer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    if state.transfers.soft_delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServiceError::NotFound(format!("Transfer {id} not found")))
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transfers).post(create_transfer))
        .route(
            "/:id",
            get(get_transfer).put(update_transfer).delete(delete_transfer),
        )
}
