//! Registro de recogidas de bombonas
//!
//! Fichas de recogida con campos protegidos cifrados, firma capturada,
//! rastreo GPS del motorista y sesiones por rol sobre un almacén JSON.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_for;
use crate::state::AppState;

/// Aplicación completa lista para servir
pub fn build_app(state: AppState) -> Router {
    let cors = cors_for(&state.config.cors_origins);

    routes::create_api_router(state.clone())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
