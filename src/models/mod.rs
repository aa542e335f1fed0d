//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean al schema PostgreSQL
//! (`migrations/`) y los requests validados de cada entidad.

pub mod client;
pub mod company;
pub mod driver;
pub mod expense;
pub mod intervention;
pub mod invoice;
pub mod partner;
pub mod rules;
pub mod shift;
pub mod trip;
pub mod user;
pub mod vehicle;

use serde::Deserialize;

/// Filtro común por estado para los listados de catálogo
#[derive(Debug, Default, Deserialize)]
pub struct StatusFilter {
    pub status: Option<String>,
}
