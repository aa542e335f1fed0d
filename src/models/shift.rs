//! Modelo de Shift (feuille de route)
//!
//! Una jornada de un chauffeur con un vehículo. Las courses y charges
//! cuelgan del shift. `status` es texto libre ("open" / "closed").

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::utils::validation::validate_km_range;

pub const SHIFT_OPEN: &str = "open";
pub const SHIFT_CLOSED: &str = "closed";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Shift {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub vehicle_id: Option<Uuid>,
    pub shift_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub start_km: Option<i32>,
    pub end_km: Option<i32>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shift {
    pub fn is_closed(&self) -> bool {
        self.status == SHIFT_CLOSED
    }

    /// Kilómetros recorridos según el compteur, si es coherente
    pub fn odometer_distance(&self) -> Option<i32> {
        match (self.start_km, self.end_km) {
            (Some(start), Some(end)) if end >= start => Some(end - start),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateShiftRequest {
    pub vehicle_id: Option<Uuid>,
    /// Por defecto: hoy
    pub shift_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,

    #[validate(range(min = 0))]
    pub start_km: Option<i32>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

fn validate_update_km(request: &UpdateShiftRequest) -> Result<(), ValidationError> {
    validate_km_range(request.start_km, request.end_km)
}

/// Auto-guardado del dashboard: actualización parcial, último en escribir gana
#[derive(Debug, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_update_km", skip_on_field_errors = true))]
pub struct UpdateShiftRequest {
    pub vehicle_id: Option<Uuid>,
    pub shift_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,

    #[validate(range(min = 0))]
    pub start_km: Option<i32>,

    #[validate(range(min = 0))]
    pub end_km: Option<i32>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CloseShiftRequest {
    pub end_time: Option<NaiveTime>,

    #[validate(range(min = 0))]
    pub end_km: Option<i32>,
}

/// Filtros del listado de feuilles de route
#[derive(Debug, Default, Deserialize)]
pub struct ShiftFilters {
    pub driver_id: Option<Uuid>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(start_km: Option<i32>, end_km: Option<i32>) -> Shift {
        Shift {
            id: Uuid::new_v4(),
            driver_id: Uuid::new_v4(),
            vehicle_id: None,
            shift_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            start_time: None,
            end_time: None,
            start_km,
            end_km,
            status: SHIFT_OPEN.to_string(),
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn odometer_distance_requires_ordered_readings() {
        assert_eq!(shift(Some(1000), Some(1180)).odometer_distance(), Some(180));
        assert_eq!(shift(Some(1000), None).odometer_distance(), None);
        assert_eq!(shift(Some(1200), Some(1000)).odometer_distance(), None);
    }

    #[test]
    fn update_rejects_backwards_odometer() {
        let request = UpdateShiftRequest {
            start_km: Some(5000),
            end_km: Some(4900),
            ..Default::default()
        };
        assert!(request.validate().is_err());

        let request = UpdateShiftRequest {
            end_km: Some(4900),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }
}
