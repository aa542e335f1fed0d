//! Módulo de base de datos
//!
//! Maneja la conexión, migraciones y health check de PostgreSQL

pub mod connection;
pub mod health;

pub use connection::{DatabaseConnection, MIGRATOR};
