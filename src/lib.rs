//! Backend de gestión de una flota de taxis
//!
//! API JSON para el tablero de los chauffeurs (feuilles de route, courses,
//! charges) y el back-office de administración.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod monitoring;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::Router;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Router completo con las capas transversales
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    routes::create_api_router(state.clone())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
