//! Reportes: feuille de route imprimible, resumen mensual y tablero

use std::collections::HashMap;

use chrono::{Datelike, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::dashboard_dto::{DashboardStats, PeriodQuery};
use crate::dto::shift_dto::MonthQuery;
use crate::dto::ApiResponse;
use crate::models::driver::Driver;
use crate::models::expense::Expense;
use crate::models::rules::SalaryRule;
use crate::models::trip::Trip;
use crate::repositories::company_repository::CompanyRepository;
use crate::repositories::driver_repository::DriverRepository;
use crate::repositories::expense_repository::ExpenseRepository;
use crate::repositories::rule_repository::SalaryRuleRepository;
use crate::repositories::shift_repository::ShiftRepository;
use crate::repositories::stats_repository::StatsRepository;
use crate::repositories::trip_repository::TripRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::finance::ShiftSummary;
use crate::services::report::{month_bounds, monthly_salary, MonthlyDriverSummary, ShiftReport};
use crate::utils::errors::{not_found_error, validation_error, AppError};

pub struct ReportController {
    company: CompanyRepository,
    drivers: DriverRepository,
    vehicles: VehicleRepository,
    salary_rules: SalaryRuleRepository,
    shifts: ShiftRepository,
    trips: TripRepository,
    expenses: ExpenseRepository,
    stats: StatsRepository,
}

impl ReportController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            company: CompanyRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            salary_rules: SalaryRuleRepository::new(pool.clone()),
            shifts: ShiftRepository::new(pool.clone()),
            trips: TripRepository::new(pool.clone()),
            expenses: ExpenseRepository::new(pool.clone()),
            stats: StatsRepository::new(pool),
        }
    }

    async fn driver(&self, id: Uuid) -> Result<Driver, AppError> {
        self.drivers
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Chauffeur", id))
    }

    async fn salary_rule(&self, driver: &Driver) -> Result<Option<SalaryRule>, AppError> {
        match driver.salary_rule_id {
            Some(rule_id) => self.salary_rules.find_by_id(rule_id).await,
            None => Ok(None),
        }
    }

    pub async fn shift_report(&self, id: Uuid, owner: Option<Uuid>) -> Result<ShiftReport, AppError> {
        let shift = match owner {
            Some(driver_id) => self.shifts.find_for_driver(id, driver_id).await?,
            None => self.shifts.find_by_id(id).await?,
        }
        .ok_or_else(|| not_found_error("Feuille de route", id))?;

        let driver = self.driver(shift.driver_id).await?;
        let vehicle = match shift.vehicle_id {
            Some(vehicle_id) => self.vehicles.find_by_id(vehicle_id).await?,
            None => None,
        };
        let rule = self.salary_rule(&driver).await?;
        let company = self.company.get().await?;
        let trips = self.trips.list_by_shift(shift.id).await?;
        let expenses = self.expenses.list_by_shift(shift.id).await?;

        Ok(ShiftReport::build(
            company.name,
            &driver,
            vehicle.as_ref(),
            rule.as_ref(),
            shift,
            trips,
            expenses,
        ))
    }

    /// Resumen de un mes; por defecto el mes en curso
    pub async fn monthly_summary(
        &self,
        driver_id: Uuid,
        query: MonthQuery,
    ) -> Result<ApiResponse<MonthlyDriverSummary>, AppError> {
        let today = Utc::now().date_naive();
        let year = query.year.unwrap_or_else(|| today.year());
        let month = query.month.unwrap_or_else(|| today.month());

        let (from, to) = month_bounds(year, month)
            .ok_or_else(|| validation_error("month", "Mes inválido (1-12)"))?;

        let driver = self.driver(driver_id).await?;
        let rule = self.salary_rule(&driver).await?;

        let shifts = self.shifts.list_for_period(driver_id, from, to).await?;
        let shift_ids: Vec<Uuid> = shifts.iter().map(|s| s.id).collect();
        let mut trips_by_shift = group_by_shift(self.trips.list_by_shifts(&shift_ids).await?, |t: &Trip| t.shift_id);
        let mut expenses_by_shift =
            group_by_shift(self.expenses.list_by_shifts(&shift_ids).await?, |e: &Expense| e.shift_id);

        let per_shift: Vec<ShiftSummary> = shifts
            .iter()
            .map(|shift| {
                let trips = trips_by_shift.remove(&shift.id).unwrap_or_default();
                let expenses = expenses_by_shift.remove(&shift.id).unwrap_or_default();
                ShiftSummary::compute(Some(shift), &trips, &expenses)
            })
            .collect();

        Ok(ApiResponse::success(MonthlyDriverSummary {
            driver_id,
            driver_name: driver.full_name(),
            year,
            month,
            shift_count: shifts.len(),
            summary: ShiftSummary::merge(&per_shift),
            salary: monthly_salary(rule.as_ref(), &per_shift),
        }))
    }

    /// Estadísticas del back-office; por defecto desde el día 1 del mes en curso
    pub async fn dashboard(&self, query: PeriodQuery) -> Result<ApiResponse<DashboardStats>, AppError> {
        let today = Utc::now().date_naive();
        let to = query.to.unwrap_or(today);
        let from = match query.from {
            Some(from) => from,
            None => to.with_day(1).unwrap_or(to),
        };

        if to < from {
            return Err(validation_error("to", "La fecha de fin es anterior a la de inicio"));
        }

        Ok(ApiResponse::success(self.stats.dashboard(from, to).await?))
    }
}

fn group_by_shift<T, F>(items: Vec<T>, key: F) -> HashMap<Uuid, Vec<T>>
where
    F: Fn(&T) -> Uuid,
{
    let mut groups: HashMap<Uuid, Vec<T>> = HashMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_items_per_shift() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let groups = group_by_shift(vec![(a, 1), (b, 2), (a, 3)], |item| item.0);

        assert_eq!(groups[&a].iter().map(|i| i.1).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(groups[&b].len(), 1);
    }
}
