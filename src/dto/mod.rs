//! DTOs de la API
//!
//! Envoltorios de respuesta, autenticación y vistas agregadas.

pub mod api_response;
pub mod auth_dto;
pub mod dashboard_dto;
pub mod shift_dto;

pub use api_response::ApiResponse;
