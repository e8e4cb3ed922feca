use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};

use super::{AppState, ListQuery};
use crate::errors::ServiceError;
use crate::services::suppliers::SupplierData;

async fn list_suppliers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let suppliers = state.suppliers.list(query.limit).await?;
    Ok(Json(suppliers))
}

async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let supplier = state
        .suppliers
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Supplier {id} not found")))?;
    Ok(Json(supplier))
}

async fn create_supplier(
    State(state): State<AppState>,
    Json(data): Json<SupplierData>,
) -> Result<impl IntoResponse, ServiceError> {
    let supplier = state.suppliers.create(data).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

async fn update_supplier(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<SupplierData>,
) -> Result<impl IntoResponse, ServiceError> {
    let supplier = state
        .suppliers
        .update(id, data)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Supplier {id} not found")))?;
    Ok(Json(supplier))
}

async fn delete_supplier(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    if state.suppliers.soft_delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServiceError::NotFound(format!("Supplier {id} not found")))
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_suppliers).post(create_supplier))
        .route(
            "/:id",
            get(get_supplier).put(update_supplier).delete(delete_supplier),
        )
}
