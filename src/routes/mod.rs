//! Routers de la API
//!
//! `create_api_router` monta las rutas públicas, el tablero del chauffeur y
//! el back-office, cada grupo con su capa de autenticación.

pub mod auth_routes;
pub mod client_routes;
pub mod company_routes;
pub mod driver_dashboard_routes;
pub mod driver_routes;
pub mod health_routes;
pub mod intervention_routes;
pub mod invoice_routes;
pub mod partner_routes;
pub mod rule_routes;
pub mod shift_routes;
pub mod stats_routes;
pub mod vehicle_routes;

use axum::{middleware, Router};

use crate::middleware::{auth_middleware, require_admin, require_driver};
use crate::state::AppState;

/// Back-office, sólo administradores
pub fn create_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/drivers", driver_routes::create_driver_router())
        .nest("/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/clients", client_routes::create_client_router())
        .nest("/partners", partner_routes::create_partner_router())
        .nest("/interventions", intervention_routes::create_intervention_router())
        .nest("/salary-rules", rule_routes::create_salary_rule_router())
        .nest("/billing-rules", rule_routes::create_billing_rule_router())
        .nest("/shifts", shift_routes::create_shift_router())
        .nest("/invoices", invoice_routes::create_invoice_router())
        .nest("/company", company_routes::create_company_router())
        .merge(stats_routes::create_stats_router())
        // la última capa se ejecuta primero: autenticar, luego comprobar el rol
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Tablero del chauffeur
pub fn create_driver_router(state: AppState) -> Router<AppState> {
    driver_dashboard_routes::create_driver_dashboard_router()
        .route_layer(middleware::from_fn(require_driver))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

pub fn create_api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(health_routes::create_health_router())
        .nest("/api/auth", auth_routes::create_auth_router(state.clone()))
        .nest("/api/driver", create_driver_router(state.clone()))
        .nest("/api/admin", create_admin_router(state))
}
