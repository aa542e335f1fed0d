//! Modelo de Company
//!
//! Parámetros de la société (fila única de la tabla `company`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::utils::validation::{validate_percentage, validate_phone, validate_siret};

/// Company - mapea exactamente a la tabla company
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Company {
    #[serde(skip_serializing)]
    pub id: i16,
    pub name: String,
    pub siret: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub vat_rate: Decimal,
    pub invoice_prefix: String,
    pub updated_at: DateTime<Utc>,
}

/// Request para actualizar los parámetros de la société
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCompanyRequest {
    #[validate(length(min = 2, max = 255))]
    pub name: Option<String>,

    #[validate(custom = "validate_siret")]
    pub siret: Option<String>,

    #[validate(length(max = 500))]
    pub address: Option<String>,

    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(custom = "validate_percentage")]
    pub vat_rate: Option<Decimal>,

    #[validate(length(min = 1, max = 10))]
    pub invoice_prefix: Option<String>,
}
