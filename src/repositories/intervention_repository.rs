use crate::models::intervention::{
    CreateInterventionRequest, Intervention, InterventionFilters, UpdateInterventionRequest,
};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct InterventionRepository {
    pool: PgPool,
}

impl InterventionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, filters: &InterventionFilters) -> Result<Vec<Intervention>, AppError> {
        let interventions = sqlx::query_as::<_, Intervention>(
            r#"
            SELECT * FROM interventions
            WHERE ($1::uuid IS NULL OR vehicle_id = $1)
              AND ($2::text IS NULL OR status = $2)
            ORDER BY intervention_date DESC, created_at DESC
            "#,
        )
        .bind(filters.vehicle_id)
        .bind(&filters.status)
        .fetch_all(&self.pool)
        .await?;

        Ok(interventions)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Intervention>, AppError> {
        let intervention = sqlx::query_as::<_, Intervention>("SELECT * FROM interventions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(intervention)
    }

    pub async fn create(&self, request: &CreateInterventionRequest) -> Result<Intervention, AppError> {
        let intervention = sqlx::query_as::<_, Intervention>(
            r#"
            INSERT INTO interventions (
                id, vehicle_id, partner_id, intervention_type, intervention_date,
                mileage, cost, description, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0), $8, COALESCE($9, 'planned'), $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.vehicle_id)
        .bind(request.partner_id)
        .bind(&request.intervention_type)
        .bind(request.intervention_date)
        .bind(request.mileage)
        .bind(request.cost)
        .bind(&request.description)
        .bind(&request.status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(intervention)
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateInterventionRequest,
    ) -> Result<Option<Intervention>, AppError> {
        let intervention = sqlx::query_as::<_, Intervention>(
            r#"
            UPDATE interventions
            SET partner_id = COALESCE($2, partner_id),
                intervention_type = COALESCE($3, intervention_type),
                intervention_date = COALESCE($4, intervention_date),
                mileage = COALESCE($5, mileage),
                cost = COALESCE($6, cost),
                description = COALESCE($7, description),
                status = COALESCE($8, status)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.partner_id)
        .bind(&request.intervention_type)
        .bind(request.intervention_date)
        .bind(request.mileage)
        .bind(request.cost)
        .bind(&request.description)
        .bind(&request.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(intervention)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM interventions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
