use crate::models::driver::{CreateDriverRequest, Driver, UpdateDriverRequest};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, status: Option<&str>) -> Result<Vec<Driver>, AppError> {
        let drivers = sqlx::query_as::<_, Driver>(
            r#"
            SELECT * FROM drivers
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY last_name, first_name
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(drivers)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>("SELECT * FROM drivers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(driver)
    }

    /// Alta del chauffeur y, si viene `(email, hash)`, de su cuenta en la
    /// misma transacción: un email de cuenta duplicado no deja un chauffeur huérfano
    pub async fn create(
        &self,
        request: &CreateDriverRequest,
        account: Option<(&str, &str)>,
    ) -> Result<Driver, AppError> {
        let mut tx = self.pool.begin().await?;

        let driver = sqlx::query_as::<_, Driver>(
            r#"
            INSERT INTO drivers (
                id, first_name, last_name, email, phone, license_number,
                hire_date, salary_rule_id, vehicle_id, status, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, 'active'), $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.first_name.trim())
        .bind(request.last_name.trim())
        .bind(request.email.as_deref().map(|e| e.trim().to_lowercase()))
        .bind(&request.phone)
        .bind(&request.license_number)
        .bind(request.hire_date)
        .bind(request.salary_rule_id)
        .bind(request.vehicle_id)
        .bind(&request.status)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        if let Some((email, password_hash)) = account {
            UserRepository::upsert_driver_account_with(&mut *tx, driver.id, email, password_hash).await?;
        }

        tx.commit().await?;
        Ok(driver)
    }

    pub async fn update(&self, id: Uuid, request: &UpdateDriverRequest) -> Result<Option<Driver>, AppError> {
        let driver = sqlx::query_as::<_, Driver>(
            r#"
            UPDATE drivers
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                license_number = COALESCE($6, license_number),
                hire_date = COALESCE($7, hire_date),
                salary_rule_id = COALESCE($8, salary_rule_id),
                vehicle_id = COALESCE($9, vehicle_id),
                status = COALESCE($10, status)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(request.email.as_deref().map(|e| e.trim().to_lowercase()))
        .bind(&request.phone)
        .bind(&request.license_number)
        .bind(request.hire_date)
        .bind(request.salary_rule_id)
        .bind(request.vehicle_id)
        .bind(&request.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(driver)
    }

    /// Borrado en cascada (feuilles, courses, charges, cuenta). Se rechaza
    /// con 409 si alguna de sus courses ya está facturada.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let invoiced: Vec<(bool,)> = sqlx::query_as(
            r#"
            SELECT t.invoice_id IS NOT NULL FROM trips t
            JOIN shifts s ON s.id = t.shift_id
            WHERE s.driver_id = $1
            FOR UPDATE OF t
            "#,
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        if invoiced.iter().any(|(billed,)| *billed) {
            return Err(AppError::Conflict(
                "El chauffeur tiene courses facturadas; archívalo en lugar de borrarlo".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
