use crate::dto::ApiResponse;
use crate::models::partner::{CreatePartnerRequest, Partner, UpdatePartnerRequest};
use crate::repositories::partner_repository::PartnerRepository;
use crate::utils::errors::{not_found_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct PartnerController {
    repository: PartnerRepository,
}

impl PartnerController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PartnerRepository::new(pool),
        }
    }

    pub async fn list(&self, status: Option<&str>) -> Result<ApiResponse<Vec<Partner>>, AppError> {
        Ok(ApiResponse::success(self.repository.list(status).await?))
    }

    pub async fn get(&self, id: Uuid) -> Result<ApiResponse<Partner>, AppError> {
        let partner = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Partenaire", id))?;

        Ok(ApiResponse::success(partner))
    }

    pub async fn create(&self, request: CreatePartnerRequest) -> Result<ApiResponse<Partner>, AppError> {
        request.validate()?;
        let partner = self.repository.create(&request).await?;
        Ok(ApiResponse::success_with_message(partner, "Partenaire creado"))
    }

    pub async fn update(&self, id: Uuid, request: UpdatePartnerRequest) -> Result<ApiResponse<Partner>, AppError> {
        request.validate()?;

        let partner = self
            .repository
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Partenaire", id))?;

        Ok(ApiResponse::success_with_message(partner, "Partenaire actualizado"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Partenaire", id));
        }
        Ok(ApiResponse::message("Partenaire eliminado"))
    }
}
