//! Agregados del tablero de administración

use crate::dto::dashboard_dto::DashboardStats;
use crate::services::finance::round_money;
use crate::utils::errors::AppError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

#[derive(Debug, FromRow)]
struct CatalogCounts {
    active_drivers: i64,
    active_vehicles: i64,
    active_clients: i64,
    open_shifts: i64,
    unpaid_invoices_total: Decimal,
}

#[derive(Debug, FromRow)]
struct PeriodTotals {
    shift_count: i64,
    trip_count: i64,
    revenue_total: Decimal,
    tips_total: Decimal,
    charges_total: Decimal,
}

pub struct StatsRepository {
    pool: PgPool,
}

impl StatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn dashboard(&self, from: NaiveDate, to: NaiveDate) -> Result<DashboardStats, AppError> {
        let counts = sqlx::query_as::<_, CatalogCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM drivers WHERE status = 'active') AS active_drivers,
                (SELECT COUNT(*) FROM vehicles WHERE status = 'active') AS active_vehicles,
                (SELECT COUNT(*) FROM clients WHERE status = 'active') AS active_clients,
                (SELECT COUNT(*) FROM shifts WHERE status = 'open') AS open_shifts,
                (SELECT COALESCE(SUM(total_ttc), 0) FROM invoices WHERE status IN ('draft', 'sent'))
                    AS unpaid_invoices_total
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let totals = sqlx::query_as::<_, PeriodTotals>(
            r#"
            WITH period_shifts AS (
                SELECT id FROM shifts WHERE shift_date BETWEEN $1 AND $2
            )
            SELECT
                (SELECT COUNT(*) FROM period_shifts) AS shift_count,
                (SELECT COUNT(*) FROM trips WHERE shift_id IN (SELECT id FROM period_shifts)) AS trip_count,
                (SELECT COALESCE(SUM(amount_collected), 0) FROM trips
                    WHERE shift_id IN (SELECT id FROM period_shifts)) AS revenue_total,
                (SELECT COALESCE(SUM(tip), 0) FROM trips
                    WHERE shift_id IN (SELECT id FROM period_shifts)) AS tips_total,
                (SELECT COALESCE(SUM(amount), 0) FROM expenses
                    WHERE shift_id IN (SELECT id FROM period_shifts)) AS charges_total
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(DashboardStats {
            period_start: from,
            period_end: to,
            active_drivers: counts.active_drivers,
            active_vehicles: counts.active_vehicles,
            active_clients: counts.active_clients,
            open_shifts: counts.open_shifts,
            shift_count: totals.shift_count,
            trip_count: totals.trip_count,
            revenue_total: round_money(totals.revenue_total),
            tips_total: round_money(totals.tips_total),
            charges_total: round_money(totals.charges_total),
            net_total: round_money(totals.revenue_total - totals.charges_total),
            unpaid_invoices_total: round_money(counts.unpaid_invoices_total),
        })
    }
}
