//! Reglas de salario y de facturación
//!
//! `SalaryRule` determina la remuneración de un chauffeur sobre el neto de
//! su feuille de route; `BillingRule` ajusta el precio facturado a un cliente.
//! La aritmética está en `services::finance`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::utils::validation::{
    validate_billing_adjustment_type, validate_catalog_status, validate_large_amount,
    validate_percentage, validate_salary_rule_type, validate_signed_amount,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SalaryRule {
    pub id: Uuid,
    pub name: String,
    pub rule_type: String,
    pub percentage: Decimal,
    pub fixed_amount: Decimal,
    pub threshold: Decimal,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSalaryRuleRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(custom = "validate_salary_rule_type")]
    pub rule_type: String,

    #[validate(custom = "validate_percentage")]
    pub percentage: Option<Decimal>,

    #[validate(custom = "validate_large_amount")]
    pub fixed_amount: Option<Decimal>,

    #[validate(custom = "validate_large_amount")]
    pub threshold: Option<Decimal>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(custom = "validate_catalog_status")]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateSalaryRuleRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(custom = "validate_salary_rule_type")]
    pub rule_type: Option<String>,

    #[validate(custom = "validate_percentage")]
    pub percentage: Option<Decimal>,

    #[validate(custom = "validate_large_amount")]
    pub fixed_amount: Option<Decimal>,

    #[validate(custom = "validate_large_amount")]
    pub threshold: Option<Decimal>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(custom = "validate_catalog_status")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BillingRule {
    pub id: Uuid,
    pub name: String,
    pub adjustment_type: String,
    pub value: Decimal,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Un porcentaje de ajuste no puede bajar de -100%
fn validate_billing_rule(request: &CreateBillingRuleRequest) -> Result<(), ValidationError> {
    validate_billing_value(&request.adjustment_type, request.value)
}

fn validate_billing_rule_update(request: &UpdateBillingRuleRequest) -> Result<(), ValidationError> {
    match (&request.adjustment_type, request.value) {
        (Some(kind), Some(value)) => validate_billing_value(kind, value),
        _ => Ok(()),
    }
}

fn validate_billing_value(adjustment_type: &str, value: Decimal) -> Result<(), ValidationError> {
    if adjustment_type == "percentage" && value < -Decimal::ONE_HUNDRED {
        let mut error = ValidationError::new("billing_value");
        error.message = Some("Un descuento no puede superar el 100%".into());
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_billing_rule", skip_on_field_errors = true))]
pub struct CreateBillingRuleRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(custom = "validate_billing_adjustment_type")]
    pub adjustment_type: String,

    /// Positivo = recargo, negativo = descuento
    #[validate(custom = "validate_signed_amount")]
    pub value: Decimal,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(custom = "validate_catalog_status")]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_billing_rule_update", skip_on_field_errors = true))]
pub struct UpdateBillingRuleRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(custom = "validate_billing_adjustment_type")]
    pub adjustment_type: Option<String>,

    #[validate(custom = "validate_signed_amount")]
    pub value: Option<Decimal>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(custom = "validate_catalog_status")]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_rule_rejects_unknown_type_and_bad_percentage() {
        let request: CreateSalaryRuleRequest = serde_json::from_value(serde_json::json!({
            "name": "Commission",
            "rule_type": "hourly",
            "percentage": "150"
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("rule_type"));
        assert!(fields.contains_key("percentage"));
    }

    #[test]
    fn billing_discount_cannot_exceed_hundred_percent() {
        let request: CreateBillingRuleRequest = serde_json::from_value(serde_json::json!({
            "name": "Remise totale",
            "adjustment_type": "percentage",
            "value": -120
        }))
        .unwrap();
        assert!(request.validate().is_err());

        let ok: CreateBillingRuleRequest = serde_json::from_value(serde_json::json!({
            "name": "Convention CPAM",
            "adjustment_type": "percentage",
            "value": "-10"
        }))
        .unwrap();
        assert!(ok.validate().is_ok());
    }
}
