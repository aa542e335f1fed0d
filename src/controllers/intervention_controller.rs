use crate::dto::ApiResponse;
use crate::models::intervention::{
    CreateInterventionRequest, Intervention, InterventionFilters, UpdateInterventionRequest,
};
use crate::repositories::intervention_repository::InterventionRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub struct InterventionController {
    repository: InterventionRepository,
    vehicles: VehicleRepository,
}

impl InterventionController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: InterventionRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    pub async fn list(&self, filters: InterventionFilters) -> Result<ApiResponse<Vec<Intervention>>, AppError> {
        Ok(ApiResponse::success(self.repository.list(&filters).await?))
    }

    pub async fn get(&self, id: Uuid) -> Result<ApiResponse<Intervention>, AppError> {
        let intervention = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Intervención", id))?;

        Ok(ApiResponse::success(intervention))
    }

    pub async fn create(&self, request: CreateInterventionRequest) -> Result<ApiResponse<Intervention>, AppError> {
        request.validate()?;

        let intervention = self.repository.create(&request).await?;

        // El kilometraje del taller también hace avanzar el compteur del vehículo
        if let Some(mileage) = intervention.mileage {
            self.vehicles.bump_mileage(intervention.vehicle_id, mileage).await?;
        }

        info!(
            "🔧 Intervención {} registrada para el vehículo {}",
            intervention.intervention_type, intervention.vehicle_id
        );

        Ok(ApiResponse::success_with_message(intervention, "Intervención registrada"))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateInterventionRequest,
    ) -> Result<ApiResponse<Intervention>, AppError> {
        request.validate()?;

        let intervention = self
            .repository
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Intervención", id))?;

        if let Some(mileage) = request.mileage {
            self.vehicles.bump_mileage(intervention.vehicle_id, mileage).await?;
        }

        Ok(ApiResponse::success_with_message(intervention, "Intervención actualizada"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Intervención", id));
        }
        Ok(ApiResponse::message("Intervención eliminada"))
    }
}
