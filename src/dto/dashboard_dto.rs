use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

// Estadísticas del back-office
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub active_drivers: i64,
    pub active_vehicles: i64,
    pub active_clients: i64,
    pub open_shifts: i64,
    pub shift_count: i64,
    pub trip_count: i64,
    pub revenue_total: Decimal,
    pub tips_total: Decimal,
    pub charges_total: Decimal,
    pub net_total: Decimal,
    pub unpaid_invoices_total: Decimal,
}
