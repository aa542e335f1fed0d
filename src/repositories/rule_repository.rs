//! Reglas de salario y de facturación

use crate::models::rules::{
    BillingRule, CreateBillingRuleRequest, CreateSalaryRuleRequest, SalaryRule,
    UpdateBillingRuleRequest, UpdateSalaryRuleRequest,
};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct SalaryRuleRepository {
    pool: PgPool,
}

impl SalaryRuleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, status: Option<&str>) -> Result<Vec<SalaryRule>, AppError> {
        let rules = sqlx::query_as::<_, SalaryRule>(
            "SELECT * FROM salary_rules WHERE ($1::text IS NULL OR status = $1) ORDER BY name",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(rules)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<SalaryRule>, AppError> {
        let rule = sqlx::query_as::<_, SalaryRule>("SELECT * FROM salary_rules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(rule)
    }

    pub async fn create(&self, request: &CreateSalaryRuleRequest) -> Result<SalaryRule, AppError> {
        let rule = sqlx::query_as::<_, SalaryRule>(
            r#"
            INSERT INTO salary_rules (id, name, rule_type, percentage, fixed_amount, threshold, description, status, created_at)
            VALUES ($1, $2, $3, COALESCE($4, 0), COALESCE($5, 0), COALESCE($6, 0), $7, COALESCE($8, 'active'), $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(&request.rule_type)
        .bind(request.percentage)
        .bind(request.fixed_amount)
        .bind(request.threshold)
        .bind(&request.description)
        .bind(&request.status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(rule)
    }

    pub async fn update(&self, id: Uuid, request: &UpdateSalaryRuleRequest) -> Result<Option<SalaryRule>, AppError> {
        let rule = sqlx::query_as::<_, SalaryRule>(
            r#"
            UPDATE salary_rules
            SET name = COALESCE($2, name),
                rule_type = COALESCE($3, rule_type),
                percentage = COALESCE($4, percentage),
                fixed_amount = COALESCE($5, fixed_amount),
                threshold = COALESCE($6, threshold),
                description = COALESCE($7, description),
                status = COALESCE($8, status)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.rule_type)
        .bind(request.percentage)
        .bind(request.fixed_amount)
        .bind(request.threshold)
        .bind(&request.description)
        .bind(&request.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rule)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM salary_rules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

pub struct BillingRuleRepository {
    pool: PgPool,
}

impl BillingRuleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, status: Option<&str>) -> Result<Vec<BillingRule>, AppError> {
        let rules = sqlx::query_as::<_, BillingRule>(
            "SELECT * FROM billing_rules WHERE ($1::text IS NULL OR status = $1) ORDER BY name",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(rules)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<BillingRule>, AppError> {
        let rule = sqlx::query_as::<_, BillingRule>("SELECT * FROM billing_rules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(rule)
    }

    pub async fn create(&self, request: &CreateBillingRuleRequest) -> Result<BillingRule, AppError> {
        let rule = sqlx::query_as::<_, BillingRule>(
            r#"
            INSERT INTO billing_rules (id, name, adjustment_type, value, description, status, created_at)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'active'), $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(&request.adjustment_type)
        .bind(request.value)
        .bind(&request.description)
        .bind(&request.status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(rule)
    }

    pub async fn update(&self, id: Uuid, request: &UpdateBillingRuleRequest) -> Result<Option<BillingRule>, AppError> {
        let rule = sqlx::query_as::<_, BillingRule>(
            r#"
            UPDATE billing_rules
            SET name = COALESCE($2, name),
                adjustment_type = COALESCE($3, adjustment_type),
                value = COALESCE($4, value),
                description = COALESCE($5, description),
                status = COALESCE($6, status)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.adjustment_type)
        .bind(request.value)
        .bind(&request.description)
        .bind(&request.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rule)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM billing_rules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
