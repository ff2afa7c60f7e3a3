pub mod auth_routes;
pub mod ficha_routes;
pub mod tracking_routes;
pub mod user_routes;

use axum::{middleware, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::middleware::auth::auth_middleware;
use crate::state::AppState;

/// Router completo de la API bajo `/api`, más `/health`
pub fn create_api_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .merge(auth_routes::create_identity_router())
        .nest("/users", user_routes::create_user_router())
        .nest("/fichas", ficha_routes::create_ficha_router())
        .nest("/tracking", tracking_routes::create_tracking_router())
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    let api = Router::new()
        .merge(auth_routes::create_session_router())
        .merge(protected);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
