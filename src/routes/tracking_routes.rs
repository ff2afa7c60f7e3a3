use axum::{
    extract::rejection::JsonRejection,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::tracking_controller::TrackingController;
use crate::dto::tracking_dto::{AddPointRequest, TrackSummaryResponse, TrackingQuery};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::tracking::TrackPoint;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_tracking_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_points).post(add_point))
        .route("/summary", get(summary))
}

async fn list_points(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<TrackingQuery>,
) -> Result<Json<ApiResponse<Vec<TrackPoint>>>, AppError> {
    let controller = TrackingController::new(&state);
    let points = controller.list_points(&user, query).await?;
    Ok(Json(ApiResponse::success(points)))
}

async fn add_point(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    payload: Result<Json<AddPointRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<TrackPoint>>), AppError> {
    let Json(request) = payload?;
    let controller = TrackingController::new(&state);
    let response = controller.add_point(&user, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn summary(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<TrackSummaryResponse>>>, AppError> {
    let controller = TrackingController::new(&state);
    let summaries = controller.summary(&user).await?;
    Ok(Json(ApiResponse::success(summaries)))
}
