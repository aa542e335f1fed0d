//! Reglas de salario y de facturación

use crate::dto::ApiResponse;
use crate::models::rules::{
    BillingRule, CreateBillingRuleRequest, CreateSalaryRuleRequest, SalaryRule,
    UpdateBillingRuleRequest, UpdateSalaryRuleRequest,
};
use crate::repositories::rule_repository::{BillingRuleRepository, SalaryRuleRepository};
use crate::utils::errors::{not_found_error, AppError};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct SalaryRuleController {
    repository: SalaryRuleRepository,
}

impl SalaryRuleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: SalaryRuleRepository::new(pool),
        }
    }

    pub async fn list(&self, status: Option<&str>) -> Result<ApiResponse<Vec<SalaryRule>>, AppError> {
        Ok(ApiResponse::success(self.repository.list(status).await?))
    }

    pub async fn get(&self, id: Uuid) -> Result<ApiResponse<SalaryRule>, AppError> {
        let rule = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Regla de salario", id))?;

        Ok(ApiResponse::success(rule))
    }

    pub async fn create(&self, request: CreateSalaryRuleRequest) -> Result<ApiResponse<SalaryRule>, AppError> {
        request.validate()?;
        let rule = self.repository.create(&request).await?;
        Ok(ApiResponse::success_with_message(rule, "Regla de salario creada"))
    }

    pub async fn update(&self, id: Uuid, request: UpdateSalaryRuleRequest) -> Result<ApiResponse<SalaryRule>, AppError> {
        request.validate()?;

        let rule = self
            .repository
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Regla de salario", id))?;

        Ok(ApiResponse::success_with_message(rule, "Regla de salario actualizada"))
    }

    /// Los chauffeurs que la usaban quedan sin regla (FK SET NULL)
    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Regla de salario", id));
        }
        Ok(ApiResponse::message("Regla de salario eliminada"))
    }
}

pub struct BillingRuleController {
    repository: BillingRuleRepository,
}

impl BillingRuleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: BillingRuleRepository::new(pool),
        }
    }

    pub async fn list(&self, status: Option<&str>) -> Result<ApiResponse<Vec<BillingRule>>, AppError> {
        Ok(ApiResponse::success(self.repository.list(status).await?))
    }

    pub async fn get(&self, id: Uuid) -> Result<ApiResponse<BillingRule>, AppError> {
        let rule = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Regla de facturación", id))?;

        Ok(ApiResponse::success(rule))
    }

    pub async fn create(&self, request: CreateBillingRuleRequest) -> Result<ApiResponse<BillingRule>, AppError> {
        request.validate()?;
        let rule = self.repository.create(&request).await?;
        Ok(ApiResponse::success_with_message(rule, "Regla de facturación creada"))
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateBillingRuleRequest,
    ) -> Result<ApiResponse<BillingRule>, AppError> {
        request.validate()?;

        let rule = self
            .repository
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Regla de facturación", id))?;

        Ok(ApiResponse::success_with_message(rule, "Regla de facturación actualizada"))
    }

    pub async fn delete(&self, id: Uuid) -> Result<ApiResponse<()>, AppError> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Regla de facturación", id));
        }
        Ok(ApiResponse::message("Regla de facturación eliminada"))
    }
}
