//! Feuilles de route, courses y charges
//!
//! Las operaciones reciben el `owner` del token: `Some(driver_id)` limita el
//! acceso a las feuilles de ese chauffeur, `None` es acceso de administrador.

use crate::dto::shift_dto::ShiftDetail;
use crate::dto::ApiResponse;
use crate::models::expense::{CreateExpenseRequest, Expense, UpdateExpenseRequest};
use crate::models::shift::{CloseShiftRequest, CreateShiftRequest, Shift, ShiftFilters, UpdateShiftRequest};
use crate::models::trip::{CreateTripRequest, Trip, UpdateTripRequest};
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::expense_repository::ExpenseRepository;
use crate::repositories::shift_repository::ShiftRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::finance::calculate_tip;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::validate_km_range;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

pub struct ShiftController {
    shifts: ShiftRepository,
    trips: TripRepository,
    expenses: ExpenseRepository,
    drivers: DriverRepository,
    vehicles: VehicleRepository,
}

impl ShiftController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            shifts: ShiftRepository::new(pool.clone()),
            trips: TripRepository::new(pool.clone()),
            expenses: ExpenseRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    async fn load_shift(&self, id: Uuid, owner: Option<Uuid>) -> Result<Shift, AppError> {
        let shift = match owner {
            Some(driver_id) => self.shifts.find_for_driver(id, driver_id).await?,
            None => self.shifts.find_by_id(id).await?,
        };
        shift.ok_or_else(|| not_found_error("Feuille de route", id))
    }

    async fn detail(&self, shift: Shift) -> Result<ShiftDetail, AppError> {
        let trips = self.trips.list_by_shift(shift.id).await?;
        let expenses = self.expenses.list_by_shift(shift.id).await?;
        Ok(ShiftDetail::new(shift, trips, expenses))
    }

    pub async fn list(&self, filters: ShiftFilters) -> Result<ApiResponse<Vec<Shift>>, AppError> {
        Ok(ApiResponse::success(self.shifts.list(&filters).await?))
    }

    pub async fn get(&self, id: Uuid, owner: Option<Uuid>) -> Result<ApiResponse<ShiftDetail>, AppError> {
        let shift = self.load_shift(id, owner).await?;
        Ok(ApiResponse::success(self.detail(shift).await?))
    }

    /// Abrir una feuille de route; vehículo y compteur inicial se toman del
    /// vehículo asignado al chauffeur cuando no vienen en la request
    pub async fn create(&self, driver_id: Uuid, mut request: CreateShiftRequest) -> Result<ApiResponse<Shift>, AppError> {
        request.validate()?;

        let driver = self
            .drivers
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| not_found_error("Chauffeur", driver_id))?;

        if !driver.is_active() {
            return Err(AppError::Forbidden("El chauffeur no está activo".to_string()));
        }

        let vehicle_id = request.vehicle_id.or(driver.vehicle_id);
        if let Some(vehicle_id) = vehicle_id {
            let vehicle = self
                .vehicles
                .find_by_id(vehicle_id)
                .await?
                .ok_or_else(|| AppError::BadRequest(format!("Vehículo {} desconocido", vehicle_id)))?;

            if request.start_km.is_none() {
                request.start_km = Some(vehicle.current_mileage);
            }
        }

        let shift = self.shifts.create(driver_id, vehicle_id, &request).await?;
        info!("📋 Feuille de route {} abierta por {}", shift.id, driver.full_name());

        Ok(ApiResponse::success_with_message(shift, "Feuille de route creada"))
    }

    /// Autoguardado parcial, la última escritura gana
    pub async fn update(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
        request: UpdateShiftRequest,
    ) -> Result<ApiResponse<Shift>, AppError> {
        request.validate()?;

        let current = self.load_shift(id, owner).await?;
        check_km(
            request.start_km.or(current.start_km),
            request.end_km.or(current.end_km),
        )?;

        let shift = self
            .shifts
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Feuille de route", id))?;

        Ok(ApiResponse::success(shift))
    }

    pub async fn close(
        &self,
        id: Uuid,
        owner: Option<Uuid>,
        request: CloseShiftRequest,
    ) -> Result<ApiResponse<ShiftDetail>, AppError> {
        request.validate()?;

        let current = self.load_shift(id, owner).await?;
        check_km(current.start_km, request.end_km.or(current.end_km))?;

        let shift = self
            .shifts
            .close(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Feuille de route", id))?;

        if let (Some(vehicle_id), Some(end_km)) = (shift.vehicle_id, shift.end_km) {
            self.vehicles.bump_mileage(vehicle_id, end_km).await?;
        }

        info!("✅ Feuille de route {} cerrada", shift.id);
        Ok(ApiResponse::success_with_message(
            self.detail(shift).await?,
            "Feuille de route cerrada",
        ))
    }

    /// Borra también sus courses y charges (FK CASCADE); 409 si alguna
    /// course ya está facturada
    pub async fn delete(&self, id: Uuid, owner: Option<Uuid>) -> Result<ApiResponse<()>, AppError> {
        let shift = self.load_shift(id, owner).await?;

        if !self.shifts.delete(shift.id).await? {
            return Err(not_found_error("Feuille de route", id));
        }
        info!("🗑️ Feuille de route {} eliminada", shift.id);
        Ok(ApiResponse::message("Feuille de route eliminada"))
    }

    pub async fn add_trip(
        &self,
        shift_id: Uuid,
        owner: Option<Uuid>,
        request: CreateTripRequest,
    ) -> Result<ApiResponse<Trip>, AppError> {
        request.validate()?;

        let shift = self.load_shift(shift_id, owner).await?;

        // Sin importe cobrado explícito se asume el precio del taxímetro
        let amount_collected = request.amount_collected.unwrap_or(request.meter_price);
        let tip = calculate_tip(request.meter_price, amount_collected);

        let trip = self.trips.create(shift.id, &request, amount_collected, tip).await?;
        self.shifts.touch(shift.id).await?;

        Ok(ApiResponse::success_with_message(trip, "Course registrada"))
    }

    pub async fn update_trip(
        &self,
        id: Uuid,
        driver_id: Uuid,
        request: UpdateTripRequest,
    ) -> Result<ApiResponse<Trip>, AppError> {
        request.validate()?;

        self.trips
            .find_for_driver(id, driver_id)
            .await?
            .ok_or_else(|| not_found_error("Course", id))?;

        // la condición invoice_id IS NULL va en el propio UPDATE
        let trip = self.trips.update(id, &request).await?.ok_or_else(invoiced_trip)?;
        self.shifts.touch(trip.shift_id).await?;

        Ok(ApiResponse::success(trip))
    }

    pub async fn delete_trip(&self, id: Uuid, driver_id: Uuid) -> Result<ApiResponse<()>, AppError> {
        let trip = self
            .trips
            .find_for_driver(id, driver_id)
            .await?
            .ok_or_else(|| not_found_error("Course", id))?;

        if !self.trips.delete(id).await? {
            return Err(invoiced_trip());
        }
        self.shifts.touch(trip.shift_id).await?;
        Ok(ApiResponse::message("Course eliminada"))
    }

    pub async fn add_expense(
        &self,
        shift_id: Uuid,
        owner: Option<Uuid>,
        request: CreateExpenseRequest,
    ) -> Result<ApiResponse<Expense>, AppError> {
        request.validate()?;

        let shift = self.load_shift(shift_id, owner).await?;
        let expense = self.expenses.create(shift.id, &request).await?;
        self.shifts.touch(shift.id).await?;

        Ok(ApiResponse::success_with_message(expense, "Charge registrada"))
    }

    pub async fn update_expense(
        &self,
        id: Uuid,
        driver_id: Uuid,
        request: UpdateExpenseRequest,
    ) -> Result<ApiResponse<Expense>, AppError> {
        request.validate()?;

        self.expenses
            .find_for_driver(id, driver_id)
            .await?
            .ok_or_else(|| not_found_error("Charge", id))?;

        let expense = self
            .expenses
            .update(id, &request)
            .await?
            .ok_or_else(|| not_found_error("Charge", id))?;
        self.shifts.touch(expense.shift_id).await?;

        Ok(ApiResponse::success(expense))
    }

    pub async fn delete_expense(&self, id: Uuid, driver_id: Uuid) -> Result<ApiResponse<()>, AppError> {
        let expense = self
            .expenses
            .find_for_driver(id, driver_id)
            .await?
            .ok_or_else(|| not_found_error("Charge", id))?;

        self.expenses.delete(id).await?;
        self.shifts.touch(expense.shift_id).await?;
        Ok(ApiResponse::message("Charge eliminada"))
    }
}

fn invoiced_trip() -> AppError {
    AppError::Conflict("La course ya está facturada".to_string())
}

/// Coherencia del compteur con los valores resultantes tras fusionar la request
fn check_km(start_km: Option<i32>, end_km: Option<i32>) -> Result<(), AppError> {
    validate_km_range(start_km, end_km).map_err(|error| {
        let mut errors = ValidationErrors::new();
        errors.add("end_km", error);
        AppError::Validation(errors)
    })
}
