use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};

use super::{AppState, ListQuery};
use crate::errors::ServiceError;
use crate::services::items::ItemData;

async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let items = state.items.list(query.limit).await?;
    Ok(Json(items))
}

async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state
        .items
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Item {id} not found")))?;
    Ok(Json(item))
}

async fn create_item(
    State(state): State<AppState>,
    Json(data): Json<ItemData>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state.items.create(data).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<ItemData>,
) -> Result<impl IntoResponse, ServiceError> {
    let item = state
        .items
        .update(id, data)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Item {id} not found")))?;
    Ok(Json(item))
}

async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    if state.items.soft_delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServiceError::NotFound(format!("Item {id} not found")))
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/:id", get(get_item).put(update_item).delete(delete_item))
}
