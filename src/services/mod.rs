//! Servicios de negocio
//!
//! Aritmética financiera, facturación y reportes. Sin acceso a base de datos.

pub mod finance;
pub mod invoicing;
pub mod report;
