//! Modelo de Expense (charge)
//!
//! Gastos de una feuille de route: carburant, péage, lavage...

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{validate_amount, validate_payment_method};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Expense {
    pub id: Uuid,
    pub shift_id: Uuid,
    pub expense_type: String,
    pub amount: Decimal,
    pub payment_method: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateExpenseRequest {
    #[validate(length(min = 2, max = 50))]
    pub expense_type: String,

    #[validate(custom = "validate_amount")]
    pub amount: Decimal,

    #[validate(custom = "validate_payment_method")]
    pub payment_method: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateExpenseRequest {
    #[validate(length(min = 2, max = 50))]
    pub expense_type: Option<String>,

    #[validate(custom = "validate_amount")]
    pub amount: Option<Decimal>,

    #[validate(custom = "validate_payment_method")]
    pub payment_method: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,
}
