//! Modelo de Trip (course)
//!
//! Una course dentro de una feuille de route. El pourboire se calcula en el
//! servidor a partir del precio del taxímetro y del importe cobrado.

use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{validate_amount, validate_distance_km, validate_payment_method};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trip {
    pub id: Uuid,
    pub shift_id: Uuid,
    pub client_id: Option<Uuid>,
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub departure_time: Option<NaiveTime>,
    pub arrival_time: Option<NaiveTime>,
    pub distance_km: Option<Decimal>,
    pub meter_price: Decimal,
    pub amount_collected: Decimal,
    pub tip: Decimal,
    pub payment_method: String,
    pub invoice_id: Option<Uuid>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTripRequest {
    pub client_id: Option<Uuid>,

    #[validate(length(max = 255))]
    pub departure: Option<String>,

    #[validate(length(max = 255))]
    pub arrival: Option<String>,

    pub departure_time: Option<NaiveTime>,
    pub arrival_time: Option<NaiveTime>,

    #[validate(custom = "validate_distance_km")]
    pub distance_km: Option<Decimal>,

    #[validate(custom = "validate_amount")]
    pub meter_price: Decimal,

    /// Por defecto igual al precio del taxímetro (sin pourboire)
    #[validate(custom = "validate_amount")]
    pub amount_collected: Option<Decimal>,

    #[validate(custom = "validate_payment_method")]
    pub payment_method: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTripRequest {
    pub client_id: Option<Uuid>,

    #[validate(length(max = 255))]
    pub departure: Option<String>,

    #[validate(length(max = 255))]
    pub arrival: Option<String>,

    pub departure_time: Option<NaiveTime>,
    pub arrival_time: Option<NaiveTime>,

    #[validate(custom = "validate_distance_km")]
    pub distance_km: Option<Decimal>,

    #[validate(custom = "validate_amount")]
    pub meter_price: Option<Decimal>,

    #[validate(custom = "validate_amount")]
    pub amount_collected: Option<Decimal>,

    #[validate(custom = "validate_payment_method")]
    pub payment_method: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_accept_numbers_and_strings() {
        let request: CreateTripRequest = serde_json::from_value(serde_json::json!({
            "meter_price": "23.40",
            "amount_collected": 25,
            "payment_method": "card"
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.meter_price, Decimal::new(2340, 2));
        assert_eq!(request.amount_collected, Some(Decimal::from(25)));
    }

    #[test]
    fn negative_prices_and_unknown_payment_are_rejected() {
        let request: CreateTripRequest = serde_json::from_value(serde_json::json!({
            "meter_price": "-1",
            "payment_method": "barter"
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("meter_price"));
        assert!(fields.contains_key("payment_method"));
    }

    #[test]
    fn amounts_must_fit_in_cents() {
        let request: CreateTripRequest = serde_json::from_value(serde_json::json!({
            "meter_price": "1000000000",
            "amount_collected": "10.004",
            "distance_km": "12.25"
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("meter_price"));
        assert!(fields.contains_key("amount_collected"));
        assert!(fields.contains_key("distance_km"));
    }
}
