use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use chrono::Utc;
use sea_orm::{ConnectionTrait, Statement};
use serde_json::json;

use super::AppState;

/// Liveness plus a database ping.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let backend = state.db.get_database_backend();
    let db_ok = state
        .db
        .execute(Statement::from_string(backend, "SELECT 1"))
        .await
        .is_ok();

    Json(json!({
        "status": if db_ok { "healthy" } else { "degraded" },
        "database": if db_ok { "up" } else { "down" },
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}
