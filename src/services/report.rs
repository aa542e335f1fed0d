//! Reportes de feuilles de route
//!
//! Ensambla el reporte imprimible de un shift (cabecera, courses, charges,
//! resumen y salario) y su versión en texto plano.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

use crate::models::driver::Driver;
use crate::models::expense::Expense;
use crate::models::rules::SalaryRule;
use crate::models::shift::Shift;
use crate::models::trip::Trip;
use crate::models::vehicle::Vehicle;
use crate::services::finance::{driver_salary, ShiftSummary};

/// Reporte completo de una feuille de route
#[derive(Debug, Clone, Serialize)]
pub struct ShiftReport {
    pub company_name: String,
    pub driver_name: String,
    pub vehicle_plate: Option<String>,
    pub shift: Shift,
    pub trips: Vec<Trip>,
    pub expenses: Vec<Expense>,
    pub summary: ShiftSummary,
    pub salary_rule: Option<String>,
    pub salary: Option<Decimal>,
}

impl ShiftReport {
    pub fn build(
        company_name: String,
        driver: &Driver,
        vehicle: Option<&Vehicle>,
        salary_rule: Option<&SalaryRule>,
        shift: Shift,
        trips: Vec<Trip>,
        expenses: Vec<Expense>,
    ) -> Self {
        let summary = ShiftSummary::compute(Some(&shift), &trips, &expenses);
        let salary = salary_rule.map(|rule| driver_salary(rule, summary.net_total));

        Self {
            company_name,
            driver_name: driver.full_name(),
            vehicle_plate: vehicle.map(|v| v.license_plate.clone()),
            shift,
            trips,
            expenses,
            summary,
            salary_rule: salary_rule.map(|r| r.name.clone()),
            salary,
        }
    }

    /// Versión imprimible
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ShiftReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.shift;

        writeln!(f, "{}", self.company_name)?;
        writeln!(f, "FEUILLE DE ROUTE du {}", s.shift_date.format("%d/%m/%Y"))?;
        writeln!(f, "Chauffeur : {}", self.driver_name)?;
        writeln!(f, "Véhicule  : {}", self.vehicle_plate.as_deref().unwrap_or("-"))?;
        writeln!(
            f,
            "Horaires  : {} - {}",
            s.start_time.map(|t| t.format("%H:%M").to_string()).unwrap_or_else(|| "-".into()),
            s.end_time.map(|t| t.format("%H:%M").to_string()).unwrap_or_else(|| "-".into()),
        )?;
        writeln!(f, "Compteur  : {} -> {} km", opt_num(s.start_km), opt_num(s.end_km))?;
        writeln!(f)?;

        writeln!(f, "COURSES ({})", self.trips.len())?;
        for (i, trip) in self.trips.iter().enumerate() {
            writeln!(
                f,
                "{:>3}. {} -> {} | taximètre {} | perçu {} | pourboire {} | {}",
                i + 1,
                trip.departure.as_deref().unwrap_or("?"),
                trip.arrival.as_deref().unwrap_or("?"),
                trip.meter_price,
                trip.amount_collected,
                trip.tip,
                trip.payment_method
            )?;
        }
        writeln!(f)?;

        writeln!(f, "CHARGES ({})", self.expenses.len())?;
        for expense in &self.expenses {
            writeln!(
                f,
                "   - {} : {} ({})",
                expense.expense_type, expense.amount, expense.payment_method
            )?;
        }
        writeln!(f)?;

        let sum = &self.summary;
        writeln!(f, "Recettes     : {}", sum.revenue_total)?;
        writeln!(f, "Pourboires   : {}", sum.tips_total)?;
        writeln!(f, "Charges      : {}", sum.charges_total)?;
        writeln!(f, "Net          : {}", sum.net_total)?;
        writeln!(f, "Kilomètres   : {}", sum.distance_km)?;
        if let (Some(rule), Some(salary)) = (&self.salary_rule, self.salary) {
            writeln!(f, "Salaire ({}) : {}", rule, salary)?;
        }
        Ok(())
    }
}

fn opt_num(value: Option<i32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Resumen mensual de un chauffeur
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyDriverSummary {
    pub driver_id: uuid::Uuid,
    pub driver_name: String,
    pub year: i32,
    pub month: u32,
    pub shift_count: usize,
    pub summary: ShiftSummary,
    pub salary: Option<Decimal>,
}

/// Primer y último día de un mes
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_month.pred_opt()?))
}

/// El salario mensual es la suma de los salarios por feuille de route
pub fn monthly_salary(rule: Option<&SalaryRule>, per_shift: &[ShiftSummary]) -> Option<Decimal> {
    rule.map(|rule| {
        per_shift
            .iter()
            .map(|s| driver_salary(rule, s.net_total))
            .fold(Decimal::ZERO, |acc, v| acc + v)
    })
}
