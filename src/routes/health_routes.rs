use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use crate::database::health::{check_database, DatabaseHealth};
use crate::state::AppState;

pub fn create_health_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/db", get(database_health))
}

/// Liveness, no toca la base de datos
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn database_health(State(state): State<AppState>) -> (StatusCode, Json<DatabaseHealth>) {
    let health = check_database(&state.pool).await;
    let status = if health.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(health))
}
