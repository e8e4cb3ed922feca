use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};

use super::{AppState, ListQuery};
use crate::errors::ServiceError;
use crate::services::clients::ClientData;

async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let clients = state.clients.list(query.limit).await?;
    Ok(Json(clients))
}

async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let client = state
        .clients
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Client {id} not found")))?;
    Ok(Json(client))
}

async fn create_client(
    State(state): State<AppState>,
    Json(data): Json<ClientData>,
) -> Result<impl IntoResponse, ServiceError> {
    let client = state.clients.create(data).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<ClientData>,
) -> Result<impl IntoResponse, ServiceError> {
    let client = state
        .clients
        .update(id, data)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Client {id} not found")))?;
    Ok(Json(client))
}

async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    if state.clients.soft_delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServiceError::NotFound(format!("Client {id} not found")))
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route(
            "/:id",
            get(get_client).put(update_client).delete(delete_client),
        )
}
