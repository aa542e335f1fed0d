use crate::models::vehicle::{CreateVehicleRequest, UpdateVehicleRequest, Vehicle};
use crate::utils::errors::AppError;
use crate::utils::validation::normalize_license_plate;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, status: Option<&str>) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM vehicles
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY license_plate
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn license_plate_exists(&self, license_plate: &str, exclude_id: Option<Uuid>) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE license_plate = $1 AND ($2::uuid IS NULL OR id <> $2))",
        )
        .bind(license_plate)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn create(&self, request: &CreateVehicleRequest) -> Result<Vehicle, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (id, license_plate, brand, model, year, fuel_type, current_mileage, status, created_at)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'diesel'), COALESCE($7, 0), COALESCE($8, 'active'), $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(normalize_license_plate(&request.license_plate))
        .bind(&request.brand)
        .bind(&request.model)
        .bind(request.year)
        .bind(&request.fuel_type)
        .bind(request.current_mileage)
        .bind(&request.status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn update(&self, id: Uuid, request: &UpdateVehicleRequest) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET license_plate = COALESCE($2, license_plate),
                brand = COALESCE($3, brand),
                model = COALESCE($4, model),
                year = COALESCE($5, year),
                fuel_type = COALESCE($6, fuel_type),
                current_mileage = COALESCE($7, current_mileage),
                status = COALESCE($8, status)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.license_plate.as_deref().map(normalize_license_plate))
        .bind(&request.brand)
        .bind(&request.model)
        .bind(request.year)
        .bind(&request.fuel_type)
        .bind(request.current_mileage)
        .bind(&request.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vehicle)
    }

    /// El compteur sólo avanza: se ignoran lecturas inferiores a la registrada
    pub async fn bump_mileage(&self, id: Uuid, mileage: i32) -> Result<(), AppError> {
        sqlx::query("UPDATE vehicles SET current_mileage = GREATEST(current_mileage, $2) WHERE id = $1")
            .bind(id)
            .bind(mileage)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
