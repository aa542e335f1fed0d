use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::intervention_controller::InterventionController;
use crate::dto::ApiResponse;
use crate::models::intervention::{
    CreateInterventionRequest, Intervention, InterventionFilters, UpdateInterventionRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_intervention_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_interventions).post(create_intervention))
        .route(
            "/:id",
            get(get_intervention).put(update_intervention).delete(delete_intervention),
        )
}

async fn list_interventions(
    State(state): State<AppState>,
    Query(filters): Query<InterventionFilters>,
) -> Result<Json<ApiResponse<Vec<Intervention>>>, AppError> {
    let controller = InterventionController::new(state.pool.clone());
    Ok(Json(controller.list(filters).await?))
}

async fn create_intervention(
    State(state): State<AppState>,
    Json(request): Json<CreateInterventionRequest>,
) -> Result<Json<ApiResponse<Intervention>>, AppError> {
    let controller = InterventionController::new(state.pool.clone());
    Ok(Json(controller.create(request).await?))
}

async fn get_intervention(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Intervention>>, AppError> {
    let controller = InterventionController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn update_intervention(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateInterventionRequest>,
) -> Result<Json<ApiResponse<Intervention>>, AppError> {
    let controller = InterventionController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_intervention(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = InterventionController::new(state.pool.clone());
    Ok(Json(controller.delete(id).await?))
}
