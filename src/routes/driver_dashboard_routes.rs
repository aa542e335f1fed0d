//! Tablero del chauffeur: todas las rutas se limitan a su propio `driver_id`

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::client_controller::ClientController;
use crate::controllers::driver_controller::DriverController;
use crate::controllers::report_controller::ReportController;
use crate::controllers::shift_controller::ShiftController;
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::shift_dto::{MonthQuery, ReportQuery, ShiftDetail};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::client::Client;
use crate::models::driver::Driver;
use crate::models::expense::{CreateExpenseRequest, Expense, UpdateExpenseRequest};
use crate::models::shift::{CloseShiftRequest, CreateShiftRequest, Shift, ShiftFilters, UpdateShiftRequest};
use crate::models::trip::{CreateTripRequest, Trip, UpdateTripRequest};
use crate::models::vehicle::Vehicle;
use crate::services::report::{MonthlyDriverSummary, ShiftReport};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/shifts", get(list_shifts).post(create_shift))
        .route("/shifts/:id", get(get_shift).put(update_shift).delete(delete_shift))
        .route("/shifts/:id/close", post(close_shift))
        .route("/shifts/:id/report", get(shift_report))
        .route("/shifts/:id/trips", post(add_trip))
        .route("/trips/:id", put(update_trip).delete(delete_trip))
        .route("/shifts/:id/expenses", post(add_expense))
        .route("/expenses/:id", put(update_expense).delete(delete_expense))
        .route("/summary", get(monthly_summary))
        .route("/clients", get(list_clients))
        .route("/vehicles", get(list_vehicles))
}

async fn get_me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Driver>>, AppError> {
    let controller = DriverController::new(state.pool.clone());
    let response = controller.get(user.require_driver_id()?).await?;
    Ok(Json(response))
}

async fn list_shifts(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(mut filters): Query<ShiftFilters>,
) -> Result<Json<ApiResponse<Vec<Shift>>>, AppError> {
    // Un chauffeur nunca ve las feuilles de otro
    filters.driver_id = Some(user.require_driver_id()?);
    let controller = ShiftController::new(state.pool.clone());
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn create_shift(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateShiftRequest>,
) -> Result<Json<ApiResponse<Shift>>, AppError> {
    let controller = ShiftController::new(state.pool.clone());
    let response = controller.create(user.require_driver_id()?, request).await?;
    Ok(Json(response))
}

async fn get_shift(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ShiftDetail>>, AppError> {
    let controller = ShiftController::new(state.pool.clone());
    let response = controller.get(id, Some(user.require_driver_id()?)).await?;
    Ok(Json(response))
}

async fn update_shift(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateShiftRequest>,
) -> Result<Json<ApiResponse<Shift>>, AppError> {
    let controller = ShiftController::new(state.pool.clone());
    let response = controller.update(id, Some(user.require_driver_id()?), request).await?;
    Ok(Json(response))
}

async fn delete_shift(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ShiftController::new(state.pool.clone());
    let response = controller.delete(id, Some(user.require_driver_id()?)).await?;
    Ok(Json(response))
}

async fn close_shift(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<CloseShiftRequest>,
) -> Result<Json<ApiResponse<ShiftDetail>>, AppError> {
    let controller = ShiftController::new(state.pool.clone());
    let response = controller.close(id, Some(user.require_driver_id()?), request).await?;
    Ok(Json(response))
}

async fn shift_report(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let report = controller.shift_report(id, Some(user.require_driver_id()?)).await?;
    Ok(render_report(report, &query))
}

/// JSON por defecto, texto plano imprimible con `?format=text`
pub(crate) fn render_report(report: ShiftReport, query: &ReportQuery) -> Response {
    if query.wants_text() {
        (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            report.render_text(),
        )
            .into_response()
    } else {
        Json(ApiResponse::success(report)).into_response()
    }
}

async fn add_trip(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(shift_id): Path<Uuid>,
    Json(request): Json<CreateTripRequest>,
) -> Result<Json<ApiResponse<Trip>>, AppError> {
    let controller = ShiftController::new(state.pool.clone());
    let response = controller.add_trip(shift_id, Some(user.require_driver_id()?), request).await?;
    Ok(Json(response))
}

async fn update_trip(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTripRequest>,
) -> Result<Json<ApiResponse<Trip>>, AppError> {
    let controller = ShiftController::new(state.pool.clone());
    let response = controller.update_trip(id, user.require_driver_id()?, request).await?;
    Ok(Json(response))
}

async fn delete_trip(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ShiftController::new(state.pool.clone());
    let response = controller.delete_trip(id, user.require_driver_id()?).await?;
    Ok(Json(response))
}

async fn add_expense(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(shift_id): Path<Uuid>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<Json<ApiResponse<Expense>>, AppError> {
    let controller = ShiftController::new(state.pool.clone());
    let response = controller
        .add_expense(shift_id, Some(user.require_driver_id()?), request)
        .await?;
    Ok(Json(response))
}

async fn update_expense(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateExpenseRequest>,
) -> Result<Json<ApiResponse<Expense>>, AppError> {
    let controller = ShiftController::new(state.pool.clone());
    let response = controller.update_expense(id, user.require_driver_id()?, request).await?;
    Ok(Json(response))
}

async fn delete_expense(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ShiftController::new(state.pool.clone());
    let response = controller.delete_expense(id, user.require_driver_id()?).await?;
    Ok(Json(response))
}

async fn monthly_summary(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<ApiResponse<MonthlyDriverSummary>>, AppError> {
    let controller = ReportController::new(state.pool.clone());
    let response = controller.monthly_summary(user.require_driver_id()?, query).await?;
    Ok(Json(response))
}

async fn list_clients(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Client>>>, AppError> {
    let controller = ClientController::new(state.pool.clone());
    let response = controller.list(Some("active")).await?;
    Ok(Json(response))
}

async fn list_vehicles(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Vehicle>>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    let response = controller.list(Some("active")).await?;
    Ok(Json(response))
}
