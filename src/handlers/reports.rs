use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::AppState;
use crate::errors::ServiceError;

/// Inclusive reporting window; RFC 3339 timestamps.
#[derive(Debug, Deserialize)]
pub struct RevenueQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

async fn warehouse_report(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let report = state.reports.warehouse_report(id).await?;
    Ok(Json(report))
}

async fn revenue_report(
    State(state): State<AppState>,
    Query(query): Query<RevenueQuery>,
) -> Result<impl IntoResponse, ServiceError> {
    let report = state.reports.revenue_between(query.start, query.end).await?;
    Ok(Json(report))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/warehouse/:id", get(warehouse_report))
        .route("/revenue", get(revenue_report))
}
