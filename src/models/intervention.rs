//! Modelo de Intervention
//!
//! Intervenciones de mantenimiento sobre un vehículo, realizadas por un partner.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::validate_large_amount;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Intervention {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub partner_id: Option<Uuid>,
    pub intervention_type: String,
    pub intervention_date: NaiveDate,
    pub mileage: Option<i32>,
    pub cost: Decimal,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInterventionRequest {
    pub vehicle_id: Uuid,
    pub partner_id: Option<Uuid>,

    #[validate(length(min = 2, max = 100))]
    pub intervention_type: String,

    pub intervention_date: NaiveDate,

    #[validate(range(min = 0))]
    pub mileage: Option<i32>,

    #[validate(custom = "validate_large_amount")]
    pub cost: Option<Decimal>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(length(min = 2, max = 30))]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateInterventionRequest {
    pub partner_id: Option<Uuid>,

    #[validate(length(min = 2, max = 100))]
    pub intervention_type: Option<String>,

    pub intervention_date: Option<NaiveDate>,

    #[validate(range(min = 0))]
    pub mileage: Option<i32>,

    #[validate(custom = "validate_large_amount")]
    pub cost: Option<Decimal>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(length(min = 2, max = 30))]
    pub status: Option<String>,
}

/// Filtros del listado de intervenciones
#[derive(Debug, Default, Deserialize)]
pub struct InterventionFilters {
    pub vehicle_id: Option<Uuid>,
    pub status: Option<String>,
}
