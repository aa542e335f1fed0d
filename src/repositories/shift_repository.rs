use crate::models::shift::{
    CloseShiftRequest, CreateShiftRequest, Shift, ShiftFilters, UpdateShiftRequest, SHIFT_CLOSED,
    SHIFT_OPEN,
};
use crate::utils::errors::AppError;
use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const DEFAULT_PAGE_SIZE: i64 = 100;
const MAX_PAGE_SIZE: i64 = 500;

pub struct ShiftRepository {
    pool: PgPool,
}

impl ShiftRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Listar feuilles de route, las más recientes primero
    pub async fn list(&self, filters: &ShiftFilters) -> Result<Vec<Shift>, AppError> {
        let limit = filters.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = filters.offset.unwrap_or(0).max(0);

        let shifts = sqlx::query_as::<_, Shift>(
            r#"
            SELECT * FROM shifts
            WHERE ($1::uuid IS NULL OR driver_id = $1)
              AND ($2::date IS NULL OR shift_date >= $2)
              AND ($3::date IS NULL OR shift_date <= $3)
              AND ($4::text IS NULL OR status = $4)
            ORDER BY shift_date DESC, created_at DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(filters.driver_id)
        .bind(filters.from)
        .bind(filters.to)
        .bind(&filters.status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(shifts)
    }

    /// Todas las feuilles de route de un chauffeur en un periodo, sin paginar
    pub async fn list_for_period(
        &self,
        driver_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Shift>, AppError> {
        let shifts = sqlx::query_as::<_, Shift>(
            r#"
            SELECT * FROM shifts
            WHERE driver_id = $1 AND shift_date BETWEEN $2 AND $3
            ORDER BY shift_date, created_at
            "#,
        )
        .bind(driver_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(shifts)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Shift>, AppError> {
        let shift = sqlx::query_as::<_, Shift>("SELECT * FROM shifts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(shift)
    }

    /// Feuille de route sólo si pertenece al chauffeur
    pub async fn find_for_driver(&self, id: Uuid, driver_id: Uuid) -> Result<Option<Shift>, AppError> {
        let shift = sqlx::query_as::<_, Shift>("SELECT * FROM shifts WHERE id = $1 AND driver_id = $2")
            .bind(id)
            .bind(driver_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(shift)
    }

    pub async fn create(
        &self,
        driver_id: Uuid,
        vehicle_id: Option<Uuid>,
        request: &CreateShiftRequest,
    ) -> Result<Shift, AppError> {
        let now = Utc::now();
        let shift = sqlx::query_as::<_, Shift>(
            r#"
            INSERT INTO shifts (id, driver_id, vehicle_id, shift_date, start_time, start_km, status, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(driver_id)
        .bind(vehicle_id)
        .bind(request.shift_date.unwrap_or_else(|| now.date_naive()))
        .bind(request.start_time)
        .bind(request.start_km)
        .bind(SHIFT_OPEN)
        .bind(&request.notes)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(shift)
    }

    /// Autoguardado: sólo se pisan los campos presentes
    pub async fn update(&self, id: Uuid, request: &UpdateShiftRequest) -> Result<Option<Shift>, AppError> {
        let shift = sqlx::query_as::<_, Shift>(
            r#"
            UPDATE shifts
            SET vehicle_id = COALESCE($2, vehicle_id),
                shift_date = COALESCE($3, shift_date),
                start_time = COALESCE($4, start_time),
                end_time = COALESCE($5, end_time),
                start_km = COALESCE($6, start_km),
                end_km = COALESCE($7, end_km),
                notes = COALESCE($8, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.vehicle_id)
        .bind(request.shift_date)
        .bind(request.start_time)
        .bind(request.end_time)
        .bind(request.start_km)
        .bind(request.end_km)
        .bind(&request.notes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shift)
    }

    pub async fn close(&self, id: Uuid, request: &CloseShiftRequest) -> Result<Option<Shift>, AppError> {
        let shift = sqlx::query_as::<_, Shift>(
            r#"
            UPDATE shifts
            SET end_time = COALESCE($2, end_time),
                end_km = COALESCE($3, end_km),
                status = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.end_time)
        .bind(request.end_km)
        .bind(SHIFT_CLOSED)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shift)
    }

    /// Tocar `updated_at` cuando cambian las líneas de la feuille
    pub async fn touch(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE shifts SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Borrado con sus courses y charges. Las courses se bloquean antes de
    /// comprobar la facturación, así una facturación concurrente espera o
    /// el borrado falla con 409.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await?;

        let invoiced: Vec<(bool,)> = sqlx::query_as(
            "SELECT invoice_id IS NOT NULL FROM trips WHERE shift_id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        if invoiced.iter().any(|(billed,)| *billed) {
            return Err(AppError::Conflict(
                "La feuille de route contiene courses ya facturadas".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM shifts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
