use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::company_controller::CompanyController;
use crate::dto::ApiResponse;
use crate::models::company::{Company, UpdateCompanyRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_company_router() -> Router<AppState> {
    Router::new().route("/", get(get_company).put(update_company))
}

async fn get_company(State(state): State<AppState>) -> Result<Json<ApiResponse<Company>>, AppError> {
    let controller = CompanyController::new(state.pool.clone());
    let response = controller.get().await?;
    Ok(Json(response))
}

async fn update_company(
    State(state): State<AppState>,
    Json(request): Json<UpdateCompanyRequest>,
) -> Result<Json<ApiResponse<Company>>, AppError> {
    let controller = CompanyController::new(state.pool.clone());
    let response = controller.update(request).await?;
    Ok(Json(response))
}
