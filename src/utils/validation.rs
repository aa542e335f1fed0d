//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! usadas por los `#[validate(custom = ...)]` de los requests.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    /// Matrícula francesa SIV: AB-123-CD (guiones o espacios opcionales)
    pub static ref LICENSE_PLATE_RE: Regex =
        Regex::new(r"^[A-Z]{2}[- ]?[0-9]{3}[- ]?[A-Z]{2}$").unwrap();

    /// SIRET: 14 dígitos, se admiten espacios de agrupación
    static ref SIRET_RE: Regex = Regex::new(r"^[0-9]{14}$").unwrap();
}

/// Estados permitidos para el campo libre `status` de las entidades de catálogo
pub const CATALOG_STATUSES: &[&str] = &["active", "inactive", "archived"];

/// Tipos de regla de salario
pub const SALARY_RULE_TYPES: &[&str] = &["percentage", "fixed", "mixed"];

/// Tipos de ajuste de las reglas de facturación
pub const BILLING_ADJUSTMENT_TYPES: &[&str] = &["percentage", "fixed"];

/// Estados de factura
pub const INVOICE_STATUSES: &[&str] = &["draft", "sent", "paid", "cancelled"];

/// Medios de pago de las courses y charges
pub const PAYMENT_METHODS: &[&str] = &["cash", "card", "cheque", "transfer", "invoice", "app"];

/// Roles de las cuentas de usuario
pub const USER_ROLES: &[&str] = &["admin", "driver"];

/// Normalizar una matrícula a formato AB-123-CD
pub fn normalize_license_plate(value: &str) -> String {
    let compact: String = value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if compact.len() == 7 {
        format!("{}-{}-{}", &compact[..2], &compact[2..5], &compact[5..])
    } else {
        value.trim().to_uppercase()
    }
}

/// Validar matrícula francesa
pub fn validate_license_plate(value: &str) -> Result<(), ValidationError> {
    if !LICENSE_PLATE_RE.is_match(&value.trim().to_uppercase()) {
        let mut error = ValidationError::new("license_plate");
        error.message = Some("Formato de matrícula inválido (AB-123-CD)".into());
        return Err(error);
    }
    Ok(())
}

/// Validar SIRET (14 dígitos)
pub fn validate_siret(value: &str) -> Result<(), ValidationError> {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    if !SIRET_RE.is_match(&compact) {
        let mut error = ValidationError::new("siret");
        error.message = Some("El SIRET debe tener 14 dígitos".into());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de teléfono (básico)
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let clean_phone = value.chars().filter(|c| c.is_ascii_digit()).collect::<String>();
    if clean_phone.len() < 10 || clean_phone.len() > 15 {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Mayor importe de las columnas NUMERIC(10, 2) (courses, charges)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Mayor importe de las columnas NUMERIC(12, 2) (reglas, interventions)
pub const MAX_LARGE_AMOUNT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Mayor distancia de NUMERIC(8, 1)
pub const MAX_DISTANCE_KM: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 1);

/// Validar que un importe no sea negativo
pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.message = Some("El valor no puede ser negativo".into());
        return Err(error);
    }
    Ok(())
}

/// Decimales y magnitud que admite la columna de destino
fn check_decimal(value: &Decimal, max_scale: u32, max: Decimal) -> Result<(), ValidationError> {
    if value.normalize().scale() > max_scale {
        let mut error = ValidationError::new("scale");
        error.message = Some("Demasiados decimales".into());
        error.add_param("max_scale".into(), &max_scale);
        return Err(error);
    }
    if value.abs() > max {
        let mut error = ValidationError::new("range");
        error.message = Some("Valor demasiado grande".into());
        error.add_param("max".into(), &max.to_string());
        return Err(error);
    }
    Ok(())
}

/// Importe de course o charge: positivo, céntimos, NUMERIC(10, 2)
pub fn validate_amount(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(value)?;
    check_decimal(value, 2, MAX_AMOUNT)
}

/// Importe de regla o intervention: positivo, céntimos, NUMERIC(12, 2)
pub fn validate_large_amount(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(value)?;
    check_decimal(value, 2, MAX_LARGE_AMOUNT)
}

/// Importe con signo (ajustes de facturación), NUMERIC(12, 2)
pub fn validate_signed_amount(value: &Decimal) -> Result<(), ValidationError> {
    check_decimal(value, 2, MAX_LARGE_AMOUNT)
}

/// Distancia en km con un decimal
pub fn validate_distance_km(value: &Decimal) -> Result<(), ValidationError> {
    validate_non_negative(value)?;
    check_decimal(value, 1, MAX_DISTANCE_KM)
}

/// Validar un porcentaje entre 0 y 100
pub fn validate_percentage(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO || *value > Decimal::ONE_HUNDRED {
        let mut error = ValidationError::new("percentage");
        error.message = Some("El porcentaje debe estar entre 0 y 100".into());
        return Err(error);
    }
    check_decimal(value, 2, Decimal::ONE_HUNDRED)
}

/// Validar que un valor esté en una lista de valores permitidos
pub fn validate_one_of(value: &str, allowed_values: &[&str]) -> Result<(), ValidationError> {
    if !allowed_values.contains(&value) {
        let mut error = ValidationError::new("enum");
        error.add_param("value".into(), &value.to_string());
        error.add_param("allowed_values".into(), &allowed_values.join(", "));
        return Err(error);
    }
    Ok(())
}

pub fn validate_catalog_status(value: &str) -> Result<(), ValidationError> {
    validate_one_of(value, CATALOG_STATUSES)
}

pub fn validate_salary_rule_type(value: &str) -> Result<(), ValidationError> {
    validate_one_of(value, SALARY_RULE_TYPES)
}

pub fn validate_billing_adjustment_type(value: &str) -> Result<(), ValidationError> {
    validate_one_of(value, BILLING_ADJUSTMENT_TYPES)
}

pub fn validate_invoice_status(value: &str) -> Result<(), ValidationError> {
    validate_one_of(value, INVOICE_STATUSES)
}

pub fn validate_payment_method(value: &str) -> Result<(), ValidationError> {
    validate_one_of(value, PAYMENT_METHODS)
}

/// Validar que el kilometraje final no sea inferior al inicial
pub fn validate_km_range(start_km: Option<i32>, end_km: Option<i32>) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (start_km, end_km) {
        if end < start {
            let mut error = ValidationError::new("km_range");
            error.message = Some("El kilometraje final es inferior al inicial".into());
            error.add_param("start_km".into(), &start);
            error.add_param("end_km".into(), &end);
            return Err(error);
        }
    }
    Ok(())
}

/// Validar que un periodo esté bien ordenado
pub fn validate_period(from: NaiveDate, to: NaiveDate) -> Result<(), ValidationError> {
    if to < from {
        let mut error = ValidationError::new("period");
        error.message = Some("La fecha de fin es anterior a la de inicio".into());
        return Err(error);
    }
    Ok(())
}

/// Validar un mes 1..=12
pub fn validate_month(month: u32) -> Result<(), ValidationError> {
    if !(1..=12).contains(&month) {
        let mut error = ValidationError::new("month");
        error.add_param("value".into(), &month);
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn license_plates() {
        assert!(validate_license_plate("AB-123-CD").is_ok());
        assert!(validate_license_plate("ab 123 cd").is_ok());
        assert!(validate_license_plate("AB123CD").is_ok());
        assert!(validate_license_plate("1234-AB-75").is_err());
        assert!(validate_license_plate("").is_err());
    }

    #[test]
    fn normalizes_plates() {
        assert_eq!(normalize_license_plate("ab 123 cd"), "AB-123-CD");
        assert_eq!(normalize_license_plate("AB123CD"), "AB-123-CD");
        assert_eq!(normalize_license_plate(" xyz "), "XYZ");
    }

    #[test]
    fn siret() {
        assert!(validate_siret("12345678901234").is_ok());
        assert!(validate_siret("123 456 789 01234").is_ok());
        assert!(validate_siret("1234567890123").is_err());
        assert!(validate_siret("1234567890123A").is_err());
    }

    #[test]
    fn phone() {
        assert!(validate_phone("06 12 34 56 78").is_ok());
        assert!(validate_phone("+33 6 12 34 56 78").is_ok());
        assert!(validate_phone("1234").is_err());
    }

    #[test]
    fn money_and_percentages() {
        assert!(validate_non_negative(&Decimal::ZERO).is_ok());
        assert!(validate_non_negative(&Decimal::from_str("12.50").unwrap()).is_ok());
        assert!(validate_non_negative(&Decimal::from_str("-0.01").unwrap()).is_err());

        assert!(validate_percentage(&Decimal::from(100)).is_ok());
        assert!(validate_percentage(&Decimal::from(101)).is_err());
        assert!(validate_percentage(&Decimal::from(-1)).is_err());
        assert!(validate_percentage(&Decimal::from_str("12.345").unwrap()).is_err());
    }

    #[test]
    fn amounts_fit_their_columns() {
        let dec = |s: &str| Decimal::from_str(s).unwrap();

        assert_eq!(MAX_AMOUNT, dec("99999999.99"));
        assert_eq!(MAX_LARGE_AMOUNT, dec("9999999999.99"));
        assert_eq!(MAX_DISTANCE_KM, dec("9999999.9"));

        assert!(validate_amount(&dec("23.40")).is_ok());
        // ceros finales no cuentan como decimales
        assert!(validate_amount(&dec("10.000")).is_ok());
        assert!(validate_amount(&dec("99999999.99")).is_ok());

        assert!(validate_amount(&dec("10.004")).is_err());
        assert!(validate_amount(&dec("100000000")).is_err());
        assert!(validate_amount(&dec("1000000000")).is_err());
        assert!(validate_amount(&dec("-0.01")).is_err());

        assert!(validate_large_amount(&dec("150000000")).is_ok());
        assert!(validate_large_amount(&dec("10000000000")).is_err());

        assert!(validate_signed_amount(&dec("-15.50")).is_ok());
        assert!(validate_signed_amount(&dec("-10000000000")).is_err());

        assert!(validate_distance_km(&dec("12.5")).is_ok());
        assert!(validate_distance_km(&dec("12.55")).is_err());
        assert!(validate_distance_km(&dec("10000000")).is_err());
    }

    #[test]
    fn km_range() {
        assert!(validate_km_range(Some(100), Some(250)).is_ok());
        assert!(validate_km_range(Some(100), Some(100)).is_ok());
        assert!(validate_km_range(Some(100), None).is_ok());
        assert!(validate_km_range(Some(250), Some(100)).is_err());
    }

    #[test]
    fn enumerations() {
        assert!(validate_salary_rule_type("mixed").is_ok());
        assert!(validate_salary_rule_type("hourly").is_err());
        assert!(validate_invoice_status("paid").is_ok());
        assert!(validate_catalog_status("deleted").is_err());
        assert!(validate_payment_method("card").is_ok());
        assert!(validate_payment_method("bitcoin").is_err());
        assert!(validate_month(12).is_ok());
        assert!(validate_month(0).is_err());
    }
}
