use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};

use super::{AppState, ListQuery};
use crate::errors::ServiceError;
use crate::services::item_groups::ItemGroupData;

async fn list_item_groups(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let groups = state.item_groups.list(query.limit).await?;
    Ok(Json(groups))
}

async fn get_item_group(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let group = state
        .item_groups
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Item group {id} not found")))?;
    Ok(Json(group))
}

async fn create_item_group(
    State(state): State<AppState>,
    Json(data): Json<ItemGroupData>,
) -> Result<impl IntoResponse, ServiceError> {
    let group = state.item_groups.create(data).await?;
    Ok((StatusCode::CREATED, Json(group)))
}

async fn update_item_group(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<ItemGroupData>,
) -> Result<impl IntoResponse, ServiceError> {
    let group = state
        .item_groups
        .update(id, data)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Item group {id} not found")))?;
    Ok(Json(group))
}

async fn delete_item_group(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    if state.item_groups.soft_delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServiceError::NotFound(format!("Item group {id} not found")))
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_item_groups).post(create_item_group))
        .route(
            "/:id",
            get(get_item_group)
                .put(update_item_group)
                .delete(delete_item_group),
        )
}
