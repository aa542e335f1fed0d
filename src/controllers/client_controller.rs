use crate::dto::ApiResponse;
use crate::models::client::{Client, CreateClientRequest, UpdateClientRequest};
use crate::repositories::client_repository::ClientRepository;
use crate::utils::errors::{not_found_error, AppError};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

pub struct ClientController {
    repository: ClientRepository,
}

impl ClientController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClientRepository::new(pool),
        }
    }

    pub async fn list(&self, status: Option<&str>) -> Result<ApiResponse<Vec<Client>>, AppError> {
        let clients = self.repository.list(status).await?;
        Ok(ApiResponse::success(clients))
    }

    pub async fn get(&self, id: Uuid) -> Result<ApiResponse<Client>, AppError> {
        let client = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Cliente", id))?;

        Ok(ApiResponse::success(client))
    }

    pub async fn create(&self, request: CreateClientRequest) -> Result<ApiResponse<Client>, AppError> {
        request.validate()?;

        let client = self.repository.create(&request).await?;
        info!("🏢 Cliente creado: {}", client.name);

        Ok(ApiResponse::success_with_message(client, "Cliente creado exitosamente"))
    }

    pub async fn update(&self, id: Uuid, request: UpdateClientRequest) -> Result<ApiResponse<Client>, AppError> {
        request.validate()?;

        let client = self
            .repository
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Cliente", id))?;

        Ok(ApiResponse::success_with_message(client, "Cliente actualizado"))
    }

    /// Un cliente con facturas no se puede borrar (FK RESTRICT → 400)
    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Cliente", id));
        }

        info!("🗑️ Cliente eliminado: {}", id);
        Ok(ApiResponse::message("Cliente eliminado"))
    }
}
