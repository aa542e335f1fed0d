use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::driver_controller::DriverController;
use crate::controllers::report_controller::ReportController;
use crate::dto::auth_dto::AccountResponse;
use crate::dto::shift_dto::MonthQuery;
use crate::dto::ApiResponse;
use crate::models::driver::{CreateDriverRequest, Driver, DriverAccountRequest, UpdateDriverRequest};
use crate::models::StatusFilter;
use crate::services::report::MonthlyDriverSummary;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_drivers).post(create_driver))
        .route("/:id", get(get_driver).put(update_driver).delete(delete_driver))
        .route("/:id/account", post(set_account))
        .route("/:id/summary", get(monthly_summary))
}

async fn list_drivers(
    State(state): State<AppState>,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<ApiResponse<Vec<Driver>>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.list(filter.status.as_deref()).await?;
    Ok(Json(response))
}

async fn create_driver(
    State(state): State<AppState>,
    Json(request): Json<CreateDriverRequest>,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.get(id).await?;
    Ok(Json(response))
}

async fn update_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDriverRequest>,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.delete(id).await?;
    Ok(Json(response))
}

async fn set_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<DriverAccountRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.set_account(id, request).await?;
    Ok(Json(response))
}

async fn monthly_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<ApiResponse<MonthlyDriverSummary>>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let response = controller.monthly_summary(id, query).await?;
    Ok(Json(response))
}
