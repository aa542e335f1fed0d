//! Repositorios
//!
//! Un repositorio por tabla; todas las consultas SQL viven aquí.

pub mod client_repository;
pub mod company_repository;
pub mod driver_repository;
pub mod expense_repository;
pub mod intervention_repository;
pub mod invoice_repository;
pub mod partner_repository;
pub mod rule_repository;
pub mod shift_repository;
pub mod stats_repository;
pub mod trip_repository;
pub mod user_repository;
pub mod vehicle_repository;
