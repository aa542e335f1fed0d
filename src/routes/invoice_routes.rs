use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::invoice_controller::{InvoiceController, InvoiceDetail};
use crate::dto::ApiResponse;
use crate::models::invoice::{GenerateInvoiceRequest, Invoice, InvoiceFilters, UpdateInvoiceStatusRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_invoice_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_invoices))
        .route("/generate", post(generate_invoice))
        .route("/:id", get(get_invoice).delete(delete_invoice))
        .route("/:id/status", put(update_status))
}

async fn list_invoices(
    State(state): State<AppState>,
    Query(filters): Query<InvoiceFilters>,
) -> Result<Json<ApiResponse<Vec<Invoice>>>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    Ok(Json(controller.list(filters).await?))
}

async fn generate_invoice(
    State(state): State<AppState>,
    Json(request): Json<GenerateInvoiceRequest>,
) -> Result<Json<ApiResponse<InvoiceDetail>>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    Ok(Json(controller.generate(request).await?))
}

async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<InvoiceDetail>>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateInvoiceStatusRequest>,
) -> Result<Json<ApiResponse<Invoice>>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    Ok(Json(controller.update_status(id, request).await?))
}

async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    Ok(Json(controller.delete(id).await?))
}
