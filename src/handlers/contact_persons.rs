use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};

use super::{AppState, ListQuery};
use crate::errors::ServiceError;
use crate::services::contact_persons::ContactPersonData;

async fn list_contact_persons(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let contacts = state.contact_persons.list(query.limit).await?;
    Ok(Json(contacts))
}

async fn get_contact_person(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let contact = state
        .contact_persons
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Contact person {id} not found")))?;
    Ok(Json(contact))
}

async fn create_contact_person(
    State(state): State<AppState>,
    Json(data): Json<ContactPersonData>,
) -> Result<impl IntoResponse, ServiceError> {
    let contact = state.contact_persons.create(data).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

async fn update_contact_person(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(data): Json<ContactPersonData>,
) -> Result<impl IntoResponse, ServiceError> {
    let contact = state
        .contact_persons
        .update(id, data)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Contact person {id} not found")))?;
    Ok(Json(contact))
}

async fn delete_contact_person(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    if state.contact_persons.soft_delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServiceError::NotFound(format!(
            "Contact person {id} not found"
        )))
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contact_persons).post(create_contact_person))
        .route(
            "/:id",
            get(get_contact_person)
                .put(update_contact_person)
                .delete(delete_contact_person),
        )
}
