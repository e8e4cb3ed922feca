use axum::{
    extract::{Json, Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};

use super::{AppState, ListQuery};
use crate::errors::ServiceError;

const DEFAULT_RECENT: u64 = 50;

async fn recent_audit_records(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let records = state
        .audit
        .recent(query.limit.unwrap_or(DEFAULT_RECENT))
        .await?;
    Ok(Json(records))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/recent", get(recent_audit_records))
}
