use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::auth_controller::AuthController;
use crate::dto::auth_dto::{LoginRequest, LoginResponse, MeResponse};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{expired_session_cookie, session_cookie};

/// Rutas públicas de sesión
pub fn create_session_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}

/// Rutas que requieren sesión
pub fn create_identity_router() -> Router<AppState> {
    Router::new().route("/me", get(me))
}

async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(request) = payload?;
    state.bootstrap_admin().await?;

    let controller = AuthController::new(&state);
    let response: LoginResponse = controller.login(request).await?;
    let cookie = session_cookie(&response.token, &state.jwt, state.config.is_production());

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::success(response)),
    ))
}

async fn logout() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, expired_session_cookie())],
        Json(ApiResponse::success_with_message(
            (),
            "Sesión cerrada".to_string(),
        )),
    )
}

async fn me(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Json<ApiResponse<MeResponse>> {
    let controller = AuthController::new(&state);
    Json(ApiResponse::success(controller.me(&user)))
}
