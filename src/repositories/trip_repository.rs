use crate::models::trip::{CreateTripRequest, Trip, UpdateTripRequest};
use crate::utils::errors::AppError;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_by_shift(&self, shift_id: Uuid) -> Result<Vec<Trip>, AppError> {
        let trips = sqlx::query_as::<_, Trip>(
            "SELECT * FROM trips WHERE shift_id = $1 ORDER BY departure_time NULLS LAST, created_at",
        )
        .bind(shift_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(trips)
    }

    pub async fn list_by_shifts(&self, shift_ids: &[Uuid]) -> Result<Vec<Trip>, AppError> {
        let trips = sqlx::query_as::<_, Trip>(
            "SELECT * FROM trips WHERE shift_id = ANY($1) ORDER BY created_at",
        )
        .bind(shift_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(trips)
    }

    pub async fn list_by_invoice(&self, invoice_id: Uuid) -> Result<Vec<Trip>, AppError> {
        let trips = sqlx::query_as::<_, Trip>(
            "SELECT * FROM trips WHERE invoice_id = $1 ORDER BY created_at",
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(trips)
    }

    /// Course sólo si su feuille de route pertenece al chauffeur
    pub async fn find_for_driver(&self, id: Uuid, driver_id: Uuid) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            SELECT t.* FROM trips t
            JOIN shifts s ON s.id = t.shift_id
            WHERE t.id = $1 AND s.driver_id = $2
            "#,
        )
        .bind(id)
        .bind(driver_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(trip)
    }

    pub async fn create(
        &self,
        shift_id: Uuid,
        request: &CreateTripRequest,
        amount_collected: Decimal,
        tip: Decimal,
    ) -> Result<Trip, AppError> {
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            INSERT INTO trips (
                id, shift_id, client_id, departure, arrival, departure_time, arrival_time,
                distance_km, meter_price, amount_collected, tip, payment_method, notes, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, COALESCE($12, 'cash'), $13, $14)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(shift_id)
        .bind(request.client_id)
        .bind(&request.departure)
        .bind(&request.arrival)
        .bind(request.departure_time)
        .bind(request.arrival_time)
        .bind(request.distance_km)
        .bind(request.meter_price)
        .bind(amount_collected)
        .bind(tip)
        .bind(&request.payment_method)
        .bind(&request.notes)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(trip)
    }

    /// Actualización parcial de una course no facturada. El pourboire se
    /// recalcula en la misma sentencia con los importes resultantes, así dos
    /// autoguardados concurrentes no dejan un pourboire incoherente.
    /// `None` si la course no existe o ya está facturada.
    pub async fn update(&self, id: Uuid, request: &UpdateTripRequest) -> Result<Option<Trip>, AppError> {
        let trip = sqlx::query_as::<_, Trip>(
            r#"
            UPDATE trips
            SET client_id = COALESCE($2, client_id),
                departure = COALESCE($3, departure),
                arrival = COALESCE($4, arrival),
                departure_time = COALESCE($5, departure_time),
                arrival_time = COALESCE($6, arrival_time),
                distance_km = COALESCE($7, distance_km),
                meter_price = COALESCE($8, meter_price),
                amount_collected = COALESCE($9, amount_collected),
                payment_method = COALESCE($10, payment_method),
                notes = COALESCE($11, notes),
                tip = GREATEST(COALESCE($9, amount_collected) - COALESCE($8, meter_price), 0)
            WHERE id = $1 AND invoice_id IS NULL
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.client_id)
        .bind(&request.departure)
        .bind(&request.arrival)
        .bind(request.departure_time)
        .bind(request.arrival_time)
        .bind(request.distance_km)
        .bind(request.meter_price)
        .bind(request.amount_collected)
        .bind(&request.payment_method)
        .bind(&request.notes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(trip)
    }

    /// `false` si la course no existe o ya está facturada
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM trips WHERE id = $1 AND invoice_id IS NULL")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
