//! Aritmética financiera de las feuilles de route
//!
//! Funciones puras sobre courses y charges: pourboire, totales, neto,
//! salario del chauffeur y ajustes de facturación. Todo en `Decimal`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::expense::Expense;
use crate::models::rules::{BillingRule, SalaryRule};
use crate::models::shift::Shift;
use crate::models::trip::Trip;

/// Redondeo monetario a céntimos (0.005 -> 0.01)
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Pourboire: lo cobrado por encima del taxímetro, nunca negativo
pub fn calculate_tip(meter_price: Decimal, amount_collected: Decimal) -> Decimal {
    if amount_collected > meter_price {
        amount_collected - meter_price
    } else {
        Decimal::ZERO
    }
}

/// Suma de una lista de importes (lista vacía -> 0)
pub fn sum_amounts<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().fold(Decimal::ZERO, |acc, amount| acc + amount)
}

/// Total de charges de una feuille de route
pub fn charges_total(expenses: &[Expense]) -> Decimal {
    sum_amounts(expenses.iter().map(|e| e.amount))
}

/// Total cobrado en las courses
pub fn revenue_total(trips: &[Trip]) -> Decimal {
    sum_amounts(trips.iter().map(|t| t.amount_collected))
}

/// Neto = cobrado - charges (puede ser negativo)
pub fn shift_net(trips: &[Trip], expenses: &[Expense]) -> Decimal {
    revenue_total(trips) - charges_total(expenses)
}

/// Resumen financiero de una feuille de route
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ShiftSummary {
    pub trip_count: usize,
    pub expense_count: usize,
    pub revenue_total: Decimal,
    pub meter_total: Decimal,
    pub tips_total: Decimal,
    pub charges_total: Decimal,
    pub net_total: Decimal,
    pub distance_km: Decimal,
    pub average_per_trip: Decimal,
    pub revenue_by_payment_method: BTreeMap<String, Decimal>,
    pub charges_by_type: BTreeMap<String, Decimal>,
}

impl ShiftSummary {
    /// Calcular el resumen; la distancia viene del compteur si es coherente,
    /// si no, de la suma de las distancias de las courses
    pub fn compute(shift: Option<&Shift>, trips: &[Trip], expenses: &[Expense]) -> Self {
        let revenue_total = revenue_total(trips);
        let charges_total = charges_total(expenses);
        let meter_total = sum_amounts(trips.iter().map(|t| t.meter_price));
        let tips_total = sum_amounts(trips.iter().map(|t| t.tip));

        let distance_km = shift
            .and_then(Shift::odometer_distance)
            .map(Decimal::from)
            .unwrap_or_else(|| sum_amounts(trips.iter().filter_map(|t| t.distance_km)));

        let average_per_trip = if trips.is_empty() {
            Decimal::ZERO
        } else {
            round_money(revenue_total / Decimal::from(trips.len()))
        };

        let mut revenue_by_payment_method = BTreeMap::new();
        for trip in trips {
            *revenue_by_payment_method
                .entry(trip.payment_method.clone())
                .or_insert(Decimal::ZERO) += trip.amount_collected;
        }

        let mut charges_by_type = BTreeMap::new();
        for expense in expenses {
            *charges_by_type
                .entry(expense.expense_type.clone())
                .or_insert(Decimal::ZERO) += expense.amount;
        }

        Self {
            trip_count: trips.len(),
            expense_count: expenses.len(),
            revenue_total,
            meter_total,
            tips_total,
            charges_total,
            net_total: revenue_total - charges_total,
            distance_km,
            average_per_trip,
            revenue_by_payment_method,
            charges_by_type,
        }
    }

    /// Agregar varios resúmenes (p.ej. un mes de feuilles de route)
    pub fn merge<'a, I>(summaries: I) -> Self
    where
        I: IntoIterator<Item = &'a ShiftSummary>,
    {
        let mut total = ShiftSummary::compute(None, &[], &[]);
        for s in summaries {
            total.trip_count += s.trip_count;
            total.expense_count += s.expense_count;
            total.revenue_total += s.revenue_total;
            total.meter_total += s.meter_total;
            total.tips_total += s.tips_total;
            total.charges_total += s.charges_total;
            total.net_total += s.net_total;
            total.distance_km += s.distance_km;
            for (method, amount) in &s.revenue_by_payment_method {
                *total
                    .revenue_by_payment_method
                    .entry(method.clone())
                    .or_insert(Decimal::ZERO) += *amount;
            }
            for (kind, amount) in &s.charges_by_type {
                *total.charges_by_type.entry(kind.clone()).or_insert(Decimal::ZERO) += *amount;
            }
        }
        total.average_per_trip = if total.trip_count == 0 {
            Decimal::ZERO
        } else {
            round_money(total.revenue_total / Decimal::from(total.trip_count))
        };
        total
    }
}

/// Salario del chauffeur según su regla, sobre el neto
pub fn driver_salary(rule: &SalaryRule, net_total: Decimal) -> Decimal {
    let share = |base: Decimal| base * rule.percentage / Decimal::ONE_HUNDRED;

    let salary = match rule.rule_type.as_str() {
        "percentage" => share(net_total),
        "fixed" => rule.fixed_amount,
        "mixed" => rule.fixed_amount + share((net_total - rule.threshold).max(Decimal::ZERO)),
        other => {
            tracing::warn!("⚠️ Tipo de regla de salario desconocido: {}", other);
            Decimal::ZERO
        }
    };

    round_money(salary.max(Decimal::ZERO))
}

/// Precio facturado tras aplicar la regla de facturación del cliente
pub fn apply_billing_rule(rule: Option<&BillingRule>, amount: Decimal) -> Decimal {
    let adjusted = match rule {
        Some(rule) if rule.adjustment_type == "percentage" => {
            amount * (Decimal::ONE + rule.value / Decimal::ONE_HUNDRED)
        }
        Some(rule) if rule.adjustment_type == "fixed" => amount + rule.value,
        _ => amount,
    };

    round_money(adjusted.max(Decimal::ZERO))
}

/// Desglose de IVA
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct VatBreakdown {
    pub total_ht: Decimal,
    pub vat_rate: Decimal,
    pub total_vat: Decimal,
    pub total_ttc: Decimal,
}

pub fn vat_breakdown(total_ht: Decimal, vat_rate: Decimal) -> VatBreakdown {
    let total_ht = round_money(total_ht);
    let total_vat = round_money(total_ht * vat_rate / Decimal::ONE_HUNDRED);
    VatBreakdown {
        total_ht,
        vat_rate,
        total_vat,
        total_ttc: total_ht + total_vat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use serde::Deserialize;
    use std::str::FromStr;
    use uuid::Uuid;

    fn d(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn trip(meter: &str, collected: &str, method: &str) -> Trip {
        let meter_price = d(meter);
        let amount_collected = d(collected);
        Trip {
            id: Uuid::new_v4(),
            shift_id: Uuid::nil(),
            client_id: None,
            departure: None,
            arrival: None,
            departure_time: None,
            arrival_time: None,
            distance_km: Some(d("12.5")),
            meter_price,
            amount_collected,
            tip: calculate_tip(meter_price, amount_collected),
            payment_method: method.to_string(),
            invoice_id: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn expense(kind: &str, amount: &str) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            shift_id: Uuid::nil(),
            expense_type: kind.to_string(),
            amount: d(amount),
            payment_method: "card".to_string(),
            description: None,
            created_at: Utc::now(),
        }
    }

    fn salary_rule(rule_type: &str, percentage: &str, fixed: &str, threshold: &str) -> SalaryRule {
        SalaryRule {
            id: Uuid::new_v4(),
            name: rule_type.to_string(),
            rule_type: rule_type.to_string(),
            percentage: d(percentage),
            fixed_amount: d(fixed),
            threshold: d(threshold),
            description: None,
            status: "active".to_string(),
            created_at: Utc::now(),
        }
    }

    fn billing_rule(adjustment_type: &str, value: &str) -> BillingRule {
        BillingRule {
            id: Uuid::new_v4(),
            name: adjustment_type.to_string(),
            adjustment_type: adjustment_type.to_string(),
            value: d(value),
            description: None,
            status: "active".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn tip_is_zero_unless_collected_exceeds_meter() {
        assert_eq!(calculate_tip(d("20.00"), d("18.00")), Decimal::ZERO);
        assert_eq!(calculate_tip(d("20.00"), d("20.00")), Decimal::ZERO);
        assert_eq!(calculate_tip(d("20.00"), d("23.50")), d("3.50"));
        assert_eq!(calculate_tip(Decimal::ZERO, d("5")), d("5"));
    }

    #[test]
    fn empty_lists_total_zero() {
        assert_eq!(charges_total(&[]), Decimal::ZERO);
        assert_eq!(revenue_total(&[]), Decimal::ZERO);
        assert_eq!(shift_net(&[], &[]), Decimal::ZERO);
    }

    #[test]
    fn charges_total_accepts_string_and_number_amounts() {
        #[derive(Deserialize)]
        struct Line {
            amount: Decimal,
        }

        let lines: Vec<Line> =
            serde_json::from_str(r#"[{"amount": "10.5"}, {"amount": 5}]"#).unwrap();
        assert_eq!(sum_amounts(lines.into_iter().map(|l| l.amount)), d("15.5"));
    }

    #[test]
    fn net_is_revenue_minus_charges() {
        let trips = vec![trip("20", "22", "cash"), trip("35.40", "35.40", "card")];
        let expenses = vec![expense("fuel", "45.10"), expense("toll", "3.20")];

        assert_eq!(revenue_total(&trips), d("57.40"));
        assert_eq!(charges_total(&expenses), d("48.30"));
        assert_eq!(shift_net(&trips, &expenses), d("9.10"));
        assert_eq!(shift_net(&[], &expenses), d("-48.30"));
    }

    #[test]
    fn summary_splits_by_payment_method_and_type() {
        let trips = vec![
            trip("20", "22", "cash"),
            trip("10", "10", "cash"),
            trip("30", "31", "card"),
        ];
        let expenses = vec![expense("fuel", "40"), expense("fuel", "10"), expense("wash", "8")];

        let summary = ShiftSummary::compute(None, &trips, &expenses);
        assert_eq!(summary.trip_count, 3);
        assert_eq!(summary.revenue_total, d("63"));
        assert_eq!(summary.meter_total, d("60"));
        assert_eq!(summary.tips_total, d("3"));
        assert_eq!(summary.net_total, d("5"));
        assert_eq!(summary.average_per_trip, d("21.00"));
        assert_eq!(summary.distance_km, d("37.5"));
        assert_eq!(summary.revenue_by_payment_method["cash"], d("32"));
        assert_eq!(summary.revenue_by_payment_method["card"], d("31"));
        assert_eq!(summary.charges_by_type["fuel"], d("50"));
    }

    #[test]
    fn summary_prefers_odometer_distance() {
        let shift = Shift {
            id: Uuid::new_v4(),
            driver_id: Uuid::new_v4(),
            vehicle_id: None,
            shift_date: NaiveDate::from_ymd_opt(2026, 5, 2).unwrap(),
            start_time: None,
            end_time: None,
            start_km: Some(10_000),
            end_km: Some(10_210),
            status: "closed".to_string(),
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let summary = ShiftSummary::compute(Some(&shift), &[trip("10", "10", "cash")], &[]);
        assert_eq!(summary.distance_km, d("210"));
    }

    #[test]
    fn merged_summaries_recompute_average() {
        let a = ShiftSummary::compute(None, &[trip("10", "10", "cash")], &[expense("fuel", "4")]);
        let b = ShiftSummary::compute(
            None,
            &[trip("20", "20", "card"), trip("30", "30", "card")],
            &[],
        );

        let total = ShiftSummary::merge([&a, &b]);
        assert_eq!(total.trip_count, 3);
        assert_eq!(total.revenue_total, d("60"));
        assert_eq!(total.net_total, d("56"));
        assert_eq!(total.average_per_trip, d("20.00"));
        assert_eq!(total.revenue_by_payment_method["card"], d("50"));

        let empty = ShiftSummary::merge(std::iter::empty());
        assert_eq!(empty.average_per_trip, Decimal::ZERO);
    }

    #[test]
    fn salary_rules() {
        let net = d("300");
        assert_eq!(driver_salary(&salary_rule("percentage", "40", "0", "0"), net), d("120.00"));
        assert_eq!(driver_salary(&salary_rule("fixed", "0", "95", "0"), net), d("95.00"));
        assert_eq!(driver_salary(&salary_rule("mixed", "50", "60", "200"), net), d("110.00"));
        // bajo el umbral sólo queda el fijo
        assert_eq!(driver_salary(&salary_rule("mixed", "50", "60", "400"), net), d("60.00"));
        // neto negativo nunca produce salario negativo
        assert_eq!(
            driver_salary(&salary_rule("percentage", "40", "0", "0"), d("-50")),
            Decimal::ZERO
        );
    }

    #[test]
    fn billing_rules() {
        assert_eq!(apply_billing_rule(None, d("40")), d("40.00"));
        assert_eq!(apply_billing_rule(Some(&billing_rule("percentage", "-10")), d("40")), d("36.00"));
        assert_eq!(apply_billing_rule(Some(&billing_rule("percentage", "15")), d("33.33")), d("38.33"));
        assert_eq!(apply_billing_rule(Some(&billing_rule("fixed", "2.5")), d("40")), d("42.50"));
        assert_eq!(apply_billing_rule(Some(&billing_rule("fixed", "-50")), d("40")), Decimal::ZERO);
    }

    #[test]
    fn vat_is_rounded_half_up() {
        let vat = vat_breakdown(d("100.05"), d("10"));
        assert_eq!(vat.total_vat, d("10.01"));
        assert_eq!(vat.total_ttc, d("110.06"));

        let zero = vat_breakdown(Decimal::ZERO, d("20"));
        assert_eq!(zero.total_ttc, Decimal::ZERO);
    }
}
