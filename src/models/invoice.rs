//! Modelo de Invoice (facture)
//!
//! Las facturas se generan a partir de las courses de un cliente en un periodo.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::utils::validation::{validate_invoice_status, validate_period};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    pub id: Uuid,
    pub number: String,
    pub client_id: Uuid,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_ht: Decimal,
    pub vat_rate: Decimal,
    pub total_vat: Decimal,
    pub total_ttc: Decimal,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn validate_generation_period(request: &GenerateInvoiceRequest) -> Result<(), ValidationError> {
    validate_period(request.period_start, request.period_end)
}

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_generation_period"))]
pub struct GenerateInvoiceRequest {
    pub client_id: Uuid,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    /// Por defecto: hoy
    pub issue_date: Option<NaiveDate>,

    #[validate(range(min = 0, max = 365))]
    pub due_days: Option<i64>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateInvoiceStatusRequest {
    #[validate(custom = "validate_invoice_status")]
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct InvoiceFilters {
    pub client_id: Option<Uuid>,
    pub status: Option<String>,
}
