use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Extension, Json, Router,
};

use crate::controllers::ficha_controller::FichaController;
use crate::dto::ficha_dto::{CreateFichaRequest, SignatureRequest, UpdateStatusRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::ficha::Ficha;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_ficha_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_fichas).post(create_ficha))
        .route("/:id", get(get_ficha))
        .route("/:id/status", patch(update_status))
        .route("/:id/signature", post(attach_signature))
}

async fn list_fichas(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<Ficha>>>, AppError> {
    let controller = FichaController::new(&state);
    let fichas = controller.list(&user).await?;
    Ok(Json(ApiResponse::success(fichas)))
}

async fn create_ficha(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    payload: Result<Json<CreateFichaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Ficha>>), AppError> {
    let Json(request) = payload?;
    let controller = FichaController::new(&state);
    let response = controller.create(&user, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_ficha(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Ficha>>, AppError> {
    let controller = FichaController::new(&state);
    let ficha = controller.get(&user, &id).await?;
    Ok(Json(ApiResponse::success(ficha)))
}

async fn update_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Ficha>>, AppError> {
    let Json(request) = payload?;
    let controller = FichaController::new(&state);
    let response = controller.update_status(&user, &id, request).await?;
    Ok(Json(response))
}

async fn attach_signature(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    payload: Result<Json<SignatureRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Ficha>>, AppError> {
    let Json(request) = payload?;
    let controller = FichaController::new(&state);
    let response = controller.attach_signature(&user, &id, request).await?;
    Ok(Json(response))
}
