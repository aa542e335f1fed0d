use serde::{Deserialize, Serialize};

use crate::models::expense::Expense;
use crate::models::shift::Shift;
use crate::models::trip::Trip;
use crate::services::finance::ShiftSummary;

// Detalle de una feuille de route con sus líneas y el resumen financiero
#[derive(Debug, Serialize)]
pub struct ShiftDetail {
    #[serde(flatten)]
    pub shift: Shift,
    pub trips: Vec<Trip>,
    pub expenses: Vec<Expense>,
    pub summary: ShiftSummary,
}

impl ShiftDetail {
    pub fn new(shift: Shift, trips: Vec<Trip>, expenses: Vec<Expense>) -> Self {
        let summary = ShiftSummary::compute(Some(&shift), &trips, &expenses);
        Self {
            shift,
            trips,
            expenses,
            summary,
        }
    }
}

// Formato del reporte: json (por defecto) o texto imprimible
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub format: Option<String>,
}

impl ReportQuery {
    pub fn wants_text(&self) -> bool {
        matches!(self.format.as_deref(), Some("text") | Some("txt"))
    }
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}
