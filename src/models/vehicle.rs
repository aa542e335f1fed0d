//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD operations.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{validate_catalog_status, validate_license_plate};

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub license_plate: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub fuel_type: String,
    pub current_mileage: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(custom = "validate_license_plate")]
    pub license_plate: String,

    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1950, max = 2100))]
    pub year: Option<i32>,

    #[validate(length(min = 2, max = 20))]
    pub fuel_type: Option<String>,

    #[validate(range(min = 0))]
    pub current_mileage: Option<i32>,

    #[validate(custom = "validate_catalog_status")]
    pub status: Option<String>,
}

/// Request para actualizar un vehículo existente
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(custom = "validate_license_plate")]
    pub license_plate: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1950, max = 2100))]
    pub year: Option<i32>,

    #[validate(length(min = 2, max = 20))]
    pub fuel_type: Option<String>,

    #[validate(range(min = 0))]
    pub current_mileage: Option<i32>,

    #[validate(custom = "validate_catalog_status")]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plate_and_year_are_checked() {
        let request: CreateVehicleRequest = serde_json::from_value(serde_json::json!({
            "license_plate": "12-ABC-34",
            "year": 1890,
            "current_mileage": -5
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("license_plate"));
        assert!(fields.contains_key("year"));
        assert!(fields.contains_key("current_mileage"));
    }

    #[test]
    fn minimal_vehicle_is_valid() {
        let request: CreateVehicleRequest =
            serde_json::from_value(serde_json::json!({ "license_plate": "GH-456-JK" })).unwrap();
        assert!(request.validate().is_ok());
    }
}
