use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};

use super::{AppState, ListQuery};
use crate::errors::ServiceError;
use crate::services::item_lines::ItemLineData;

async fn list_item_lines(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let lines = state.item_lines.list(query.limit).await?;
    Ok(Json(lines))
}

async fn get_item_line(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let line = state
        .item_lines
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Item line {id} not found")))?;
    Ok(Json(line))
}

async fn create_item_line(
    State(state): State<AppState>,
    Json(data): Json<ItemLineData>,
) -> Result<impl IntoResponse, ServiceError> {
    let line = state.item_lines.create(data).await?;
    Ok((StatusCode::CREATED, Json(line)))
}

async fn update_item_line(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<ItemLineData>,
) -> Result<impl IntoResponse, ServiceError> {
    let line = state
        .item_lines
        .update(id, data)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Item line {id} not found")))?;
    Ok(Json(line))
}

async fn delete_item_line(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    if state.item_lines.soft_delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServiceError::NotFound(format!("Item line {id} not found")))
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_item_lines).post(create_item_line))
        .route(
            "/:id",
            get(get_item_line)
                .put(update_item_line)
                .delete(delete_item_line),
        )
}
