use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::rule_controller::{BillingRuleController, SalaryRuleController};
use crate::dto::ApiResponse;
use crate::models::rules::{
    BillingRule, CreateBillingRuleRequest, CreateSalaryRuleRequest, SalaryRule,
    UpdateBillingRuleRequest, UpdateSalaryRuleRequest,
};
use crate::models::StatusFilter;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_salary_rule_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_salary_rules).post(create_salary_rule))
        .route(
            "/:id",
            get(get_salary_rule).put(update_salary_rule).delete(delete_salary_rule),
        )
}

pub fn create_billing_rule_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_billing_rules).post(create_billing_rule))
        .route(
            "/:id",
            get(get_billing_rule).put(update_billing_rule).delete(delete_billing_rule),
        )
}

async fn list_salary_rules(
    State(state): State<AppState>,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<ApiResponse<Vec<SalaryRule>>>, AppError> {
    let controller = SalaryRuleController::new(state.pool.clone());
    Ok(Json(controller.list(filter.status.as_deref()).await?))
}

async fn create_salary_rule(
    State(state): State<AppState>,
    Json(request): Json<CreateSalaryRuleRequest>,
) -> Result<Json<ApiResponse<SalaryRule>>, AppError> {
    let controller = SalaryRuleController::new(state.pool.clone());
    Ok(Json(controller.create(request).await?))
}

async fn get_salary_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<SalaryRule>>, AppError> {
    let controller = SalaryRuleController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn update_salary_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSalaryRuleRequest>,
) -> Result<Json<ApiResponse<SalaryRule>>, AppError> {
    let controller = SalaryRuleController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_salary_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = SalaryRuleController::new(state.pool.clone());
    Ok(Json(controller.delete(id).await?))
}

async fn list_billing_rules(
    State(state): State<AppState>,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<ApiResponse<Vec<BillingRule>>>, AppError> {
    let controller = BillingRuleController::new(state.pool.clone());
    Ok(Json(controller.list(filter.status.as_deref()).await?))
}

async fn create_billing_rule(
    State(state): State<AppState>,
    Json(request): Json<CreateBillingRuleRequest>,
) -> Result<Json<ApiResponse<BillingRule>>, AppError> {
    let controller = BillingRuleController::new(state.pool.clone());
    Ok(Json(controller.create(request).await?))
}

async fn get_billing_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BillingRule>>, AppError> {
    let controller = BillingRuleController::new(state.pool.clone());
    Ok(Json(controller.get(id).await?))
}

async fn update_billing_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBillingRuleRequest>,
) -> Result<Json<ApiResponse<BillingRule>>, AppError> {
    let controller = BillingRuleController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_billing_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = BillingRuleController::new(state.pool.clone());
    Ok(Json(controller.delete(id).await?))
}
