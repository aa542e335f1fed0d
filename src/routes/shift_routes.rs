//! Consulta de feuilles de route desde el back-office

use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::report_controller::ReportController;
use crate::controllers::shift_controller::ShiftController;
use crate::dto::shift_dto::{ReportQuery, ShiftDetail};
use crate::dto::ApiResponse;
use crate::models::shift::{Shift, ShiftFilters};
use crate::routes::driver_dashboard_routes::render_report;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_shift_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_shifts))
        .route("/:id", get(get_shift).delete(delete_shift))
        .route("/:id/report", get(shift_report))
}

async fn list_shifts(
    State(state): State<AppState>,
    Query(filters): Query<ShiftFilters>,
) -> Result<Json<ApiResponse<Vec<Shift>>>, AppError> {
    let controller = ShiftController::new(state.pool.clone());
    Ok(Json(controller.list(filters).await?))
}

async fn get_shift(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ShiftDetail>>, AppError> {
    let controller = ShiftController::new(state.pool.clone());
    Ok(Json(controller.get(id, None).await?))
}

async fn delete_shift(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ShiftController::new(state.pool.clone());
    Ok(Json(controller.delete(id, None).await?))
}

async fn shift_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let report = controller.shift_report(id, None).await?;
    Ok(render_report(report, &query))
}
