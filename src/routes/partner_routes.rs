use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::partner_controller::PartnerController;
use crate::dto::ApiResponse;
use crate::models::partner::{CreatePartnerRequest, Partner, UpdatePartnerRequest};
use crate::models::StatusFilter;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_partner_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_partners).post(create_partner))
        .route("/:id", get(get_partner).put(update_partner).delete(delete_partner))
}

async fn list_partners(
    State(state): State<AppState>,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<ApiResponse<Vec<Partner>>>, AppError> {
    let controller = PartnerController::new(state.pool.clone());
    Ok(Json(controller.list(filter.status.as_deref()).await?))
}

async fn create_partner(
    State(state): State<AppState>,
    Json(request): Json<CreatePartnerRequest>,
) -> Result<Json<ApiResponse<Partner>>, AppError> {
    let controller = PartnerController::new(state.pool.clone());
    Ok(Json(controller.create(request).await?))
}

async fn get_partner(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Partner>>, AppError> {
    let controller = PartnerController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn update_partner(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdatePartnerRequest>,
) -> Result<Json<ApiResponse<Partner>>, AppError> {
    let controller = PartnerController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_partner(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = PartnerController::new(state.pool.clone());
    Ok(Json(controller.delete(id).await?))
}
