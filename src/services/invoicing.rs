//! Numeración y totales de facturas

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::rules::BillingRule;
use crate::models::trip::Trip;
use crate::services::finance::{apply_billing_rule, sum_amounts, vat_breakdown, VatBreakdown};

/// Número de factura `{prefix}-{year}-{seq:04}`
pub fn format_invoice_number(prefix: &str, year: i32, sequence: u32) -> String {
    format!("{}-{}-{:04}", prefix, year, sequence)
}

/// Patrón LIKE (con `ESCAPE '\'`) de los números de un prefijo y año.
/// El prefijo es configurable: `%` y `_` se escapan para que sean literales.
pub fn invoice_number_pattern(prefix: &str, year: i32) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("{}-{}-%", escaped, year)
}

/// Extraer la secuencia de un número existente del mismo prefijo y año
pub fn parse_invoice_sequence(number: &str, prefix: &str, year: i32) -> Option<u32> {
    number
        .strip_prefix(prefix)?
        .strip_prefix('-')?
        .strip_prefix(&year.to_string())?
        .strip_prefix('-')?
        .parse()
        .ok()
}

/// Siguiente número a partir del último emitido (si existe)
pub fn next_invoice_number(prefix: &str, issue_date: NaiveDate, last_number: Option<&str>) -> String {
    let year = issue_date.year();
    let last = last_number
        .and_then(|n| parse_invoice_sequence(n, prefix, year))
        .unwrap_or(0);
    format_invoice_number(prefix, year, last + 1)
}

/// Fecha de vencimiento, por defecto a 30 días
pub fn due_date(issue_date: NaiveDate, due_days: Option<i64>) -> NaiveDate {
    issue_date + Duration::days(due_days.unwrap_or(30))
}

/// Línea de factura derivada de una course
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvoiceLine {
    pub trip_id: Uuid,
    pub meter_price: Decimal,
    pub billed_amount: Decimal,
}

/// Borrador calculado antes de insertar
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceDraft {
    pub lines: Vec<InvoiceLine>,
    pub totals: VatBreakdown,
}

/// Facturar cada course por su precio de taxímetro ajustado por la regla del cliente
pub fn build_invoice_draft(trips: &[Trip], rule: Option<&BillingRule>, vat_rate: Decimal) -> InvoiceDraft {
    let lines: Vec<InvoiceLine> = trips
        .iter()
        .map(|trip| InvoiceLine {
            trip_id: trip.id,
            meter_price: trip.meter_price,
            billed_amount: apply_billing_rule(rule, trip.meter_price),
        })
        .collect();

    let total_ht = sum_amounts(lines.iter().map(|l| l.billed_amount));

    InvoiceDraft {
        totals: vat_breakdown(total_ht, vat_rate),
        lines,
    }
}
