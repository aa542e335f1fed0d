use crate::controllers::auth_controller::hash_password;
use crate::dto::auth_dto::AccountResponse;
use crate::dto::ApiResponse;
use crate::models::driver::{CreateDriverRequest, Driver, DriverAccountRequest, UpdateDriverRequest};
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{not_found_error, AppError};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub struct DriverController {
    repository: DriverRepository,
    users: UserRepository,
}

impl DriverController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DriverRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    pub async fn list(&self, status: Option<&str>) -> Result<ApiResponse<Vec<Driver>>, AppError> {
        Ok(ApiResponse::success(self.repository.list(status).await?))
    }

    pub async fn find(&self, id: Uuid) -> Result<Driver, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Chauffeur", id))
    }

    pub async fn get(&self, id: Uuid) -> Result<ApiResponse<Driver>, AppError> {
        Ok(ApiResponse::success(self.find(id).await?))
    }

    /// Alta de chauffeur; con `password` y `email` se crea también su cuenta
    pub async fn create(&self, request: CreateDriverRequest) -> Result<ApiResponse<Driver>, AppError> {
        request.validate()?;

        let account = match (&request.email, &request.password) {
            (Some(email), Some(password)) => Some((email.clone(), hash_password(password).await?)),
            (None, Some(_)) => {
                return Err(AppError::BadRequest(
                    "Se necesita un email para crear la cuenta del chauffeur".to_string(),
                ))
            }
            _ => None,
        };

        let account = account.as_ref().map(|(email, hash)| (email.as_str(), hash.as_str()));
        let driver = self.repository.create(&request, account).await?;

        info!("🧑‍✈️ Chauffeur creado: {}", driver.full_name());
        Ok(ApiResponse::success_with_message(driver, "Chauffeur creado exitosamente"))
    }

    pub async fn update(&self, id: Uuid, request: UpdateDriverRequest) -> Result<ApiResponse<Driver>, AppError> {
        request.validate()?;

        let driver = self
            .repository
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Chauffeur", id))?;

        Ok(ApiResponse::success_with_message(driver, "Chauffeur actualizado"))
    }

    /// Borra también sus feuilles de route y su cuenta (FK CASCADE);
    /// con courses facturadas devuelve 409
    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Chauffeur", id));
        }

        info!("🗑️ Chauffeur eliminado: {}", id);
        Ok(ApiResponse::message("Chauffeur eliminado"))
    }

    /// Crear o reinicializar la cuenta de acceso de un chauffeur
    pub async fn set_account(
        &self,
        id: Uuid,
        request: DriverAccountRequest,
    ) -> Result<ApiResponse<AccountResponse>, AppError> {
        request.validate()?;

        let driver = self.find(id).await?;
        let email = request
            .email
            .or(driver.email)
            .ok_or_else(|| AppError::BadRequest("El chauffeur no tiene email".to_string()))?;

        let hash = hash_password(&request.password).await?;
        let user = self.users.upsert_driver_account(id, &email, &hash).await?;

        info!("🔑 Cuenta de chauffeur lista: {}", user.email);
        Ok(ApiResponse::success_with_message(
            AccountResponse::from(user),
            "Cuenta del chauffeur actualizada",
        ))
    }
}
