use crate::dto::ApiResponse;
use crate::models::company::{Company, UpdateCompanyRequest};
use crate::repositories::company_repository::CompanyRepository;
use crate::utils::errors::AppError;
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

pub struct CompanyController {
    repository: CompanyRepository,
}

impl CompanyController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CompanyRepository::new(pool),
        }
    }

    pub async fn get(&self) -> Result<ApiResponse<Company>, AppError> {
        Ok(ApiResponse::success(self.repository.get().await?))
    }

    pub async fn update(&self, request: UpdateCompanyRequest) -> Result<ApiResponse<Company>, AppError> {
        request.validate()?;

        let company = self.repository.update(&request).await?;
        info!("🏢 Datos de la empresa actualizados: {}", company.name);

        Ok(ApiResponse::success_with_message(company, "Empresa actualizada"))
    }
}
