use crate::dto::ApiResponse;
use crate::models::intervention::{Intervention, InterventionFilters};
use crate::models::vehicle::{CreateVehicleRequest, UpdateVehicleRequest, Vehicle};
use crate::repositories::intervention_repository::InterventionRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::normalize_license_plate;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub struct VehicleController {
    repository: VehicleRepository,
    interventions: InterventionRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            interventions: InterventionRepository::new(pool),
        }
    }

    pub async fn list(&self, status: Option<&str>) -> Result<ApiResponse<Vec<Vehicle>>, AppError> {
        let vehicles = self.repository.list(status).await?;
        Ok(ApiResponse::success(vehicles))
    }

    pub async fn get(&self, id: Uuid) -> Result<ApiResponse<Vehicle>, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", id))?;

        Ok(ApiResponse::success(vehicle))
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> Result<ApiResponse<Vehicle>, AppError> {
        request.validate()?;

        let plate = normalize_license_plate(&request.license_plate);
        if self.repository.license_plate_exists(&plate, None).await? {
            return Err(AppError::Conflict(format!("La matrícula {} ya está registrada", plate)));
        }

        let vehicle = self.repository.create(&request).await?;
        info!("🚕 Vehículo creado: {}", vehicle.license_plate);

        Ok(ApiResponse::success_with_message(vehicle, "Vehículo creado exitosamente"))
    }

    pub async fn update(&self, id: Uuid, request: UpdateVehicleRequest) -> Result<ApiResponse<Vehicle>, AppError> {
        request.validate()?;

        if let Some(plate) = request.license_plate.as_deref().map(normalize_license_plate) {
            if self.repository.license_plate_exists(&plate, Some(id)).await? {
                return Err(AppError::Conflict(format!("La matrícula {} ya está registrada", plate)));
            }
        }

        let vehicle = self
            .repository
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", id))?;

        Ok(ApiResponse::success_with_message(vehicle, "Vehículo actualizado"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Vehículo", id));
        }

        info!("🗑️ Vehículo eliminado: {}", id);
        Ok(ApiResponse::message("Vehículo eliminado"))
    }

    /// Historial de mantenimiento de un vehículo
    pub async fn interventions(&self, id: Uuid) -> Result<ApiResponse<Vec<Intervention>>, AppError> {
        // 404 si el vehículo no existe, en vez de una lista vacía
        self.get(id).await?;

        let filters = InterventionFilters {
            vehicle_id: Some(id),
            status: None,
        };
        let interventions = self.interventions.list(&filters).await?;
        Ok(ApiResponse::success(interventions))
    }
}
