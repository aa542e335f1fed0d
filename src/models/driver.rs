//! Modelo de Driver (chauffeur)
//!
//! Mapea la tabla `drivers`. La cuenta de acceso vive en `users`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{validate_catalog_status, validate_phone};

/// Driver principal - mapea exactamente a la tabla drivers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub salary_rule_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Driver {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

/// Request para crear un nuevo chauffeur
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    #[validate(length(min = 3, max = 50))]
    pub license_number: Option<String>,

    pub hire_date: Option<NaiveDate>,
    pub salary_rule_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,

    #[validate(custom = "validate_catalog_status")]
    pub status: Option<String>,

    /// Si se indica, se crea también la cuenta de acceso (email obligatorio)
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
}

/// Request para actualizar un chauffeur existente
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateDriverRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    #[validate(length(min = 3, max = 50))]
    pub license_number: Option<String>,

    pub hire_date: Option<NaiveDate>,
    pub salary_rule_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,

    #[validate(custom = "validate_catalog_status")]
    pub status: Option<String>,
}

/// Request para crear o reinicializar la cuenta de un chauffeur
#[derive(Debug, Deserialize, Validate)]
pub struct DriverAccountRequest {
    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_validates_contact_fields() {
        let request: CreateDriverRequest = serde_json::from_value(serde_json::json!({
            "first_name": "Karim",
            "last_name": "Benali",
            "email": "not-an-email",
            "phone": "12"
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("phone"));
        assert!(!fields.contains_key("first_name"));
    }

    #[test]
    fn short_password_is_rejected() {
        let request: CreateDriverRequest = serde_json::from_value(serde_json::json!({
            "first_name": "Léa",
            "last_name": "Martin",
            "email": "lea@example.fr",
            "password": "short"
        }))
        .unwrap();

        assert!(request.validate().unwrap_err().field_errors().contains_key("password"));
    }
}
