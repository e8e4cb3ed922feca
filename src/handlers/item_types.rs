use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};

use super::{AppState, ListQuery};
use crate::errors::ServiceError;
use crate::services::item_types::ItemTypeData;

async fn list_item_types(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let types = state.item_types.list(query.limit).await?;
    Ok(Json(types))
}

async fn get_item_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let item_type = state
        .item_types
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Item type {id} not found")))?;
    Ok(Json(item_type))
}

async fn create_item_type(
    State(state): State<AppState>,
    Json(data): Json<ItemTypeData>,
) -> Result<impl IntoResponse, ServiceError> {
    let item_type = state.item_types.create(data).await?;
    Ok((StatusCode::CREATED, Json(item_type)))
}

async fn update_item_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<ItemTypeData>,
) -> Result<impl IntoResponse, ServiceError> {
    let item_type = state
        .item_types
        .update(id, data)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Item type {id} not found")))?;
    Ok(Json(item_type))
}

async fn delete_item_type(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    if state.item_types.soft_delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServiceError::NotFound(format!("Item type {id} not found")))
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_item_types).post(create_item_type))
        .route(
            "/:id",
            get(get_item_type)
                .put(update_item_type)
                .delete(delete_item_type),
        )
}
