use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};

use super::{AppState, ListQuery};
use crate::errors::ServiceError;
use crate::services::locations::LocationData;

async fn list_locations(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let locations = state.locations.list(query.limit).await?;
    Ok(Json(locations))
}

async fn get_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let location = state
        .locations
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Location {id} not found")))?;
    Ok(Json(location))
}

async fn create_location(
    State(state): State<AppState>,
    Json(data): Json<LocationData>,
) -> Result<impl IntoResponse, ServiceError> {
    let location = state.locations.create(data).await?;
    Ok((StatusCode::CREATED, Json(location)))
}

async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<LocationData>,
) -> Result<impl IntoResponse, ServiceError> {
    let location = state
        .locations
        .update(id, data)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Location {id} not found")))?;
    Ok(Json(location))
}

async fn delete_location(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    if state.locations.soft_delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServiceError::NotFound(format!("Location {id} not found")))
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_locations).post(create_location))
        .route(
            "/:id",
            get(get_location).put(update_location).delete(delete_location),
        )
}
