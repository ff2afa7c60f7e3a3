use std::collections::HashMap;

use validator::Validate;

use crate::dto::tracking_dto::{AddPointRequest, TrackSummaryResponse, TrackingQuery};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::ficha::Ficha;
use crate::models::tracking::{NewTrackPoint, TrackPoint};
use crate::repositories::{FichaRepository, TrackingRepository};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, not_found_error, AppError};

pub struct TrackingController {
    fichas: FichaRepository,
    tracking: TrackingRepository,
}

impl TrackingController {
    pub fn new(state: &AppState) -> Self {
        Self {
            fichas: state.fichas.clone(),
            tracking: state.tracking.clone(),
        }
    }

    async fn find_accessible(
        &self,
        user: &AuthenticatedUser,
        ficha_id: &str,
        operation: &str,
    ) -> Result<Ficha, AppError> {
        let ficha = self
            .fichas
            .get_by_id(ficha_id)
            .await?
            .ok_or_else(|| not_found_error("Ficha", ficha_id))?;
        user.ensure_ficha_access(&ficha, operation)?;
        Ok(ficha)
    }

    pub async fn list_points(
        &self,
        user: &AuthenticatedUser,
        query: TrackingQuery,
    ) -> Result<Vec<TrackPoint>, AppError> {
        let ficha_id = query
            .ficha_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| bad_request_error("El parámetro ficha_id es requerido"))?;

        self.find_accessible(user, ficha_id, "ver el rastreo").await?;
        self.tracking.list_by_ficha(ficha_id).await
    }

    pub async fn add_point(
        &self,
        user: &AuthenticatedUser,
        request: AddPointRequest,
    ) -> Result<ApiResponse<TrackPoint>, AppError> {
        request.validate()?;
        let ficha_id = request.ficha_id.trim();
        self.find_accessible(user, ficha_id, "registrar posición").await?;

        let point = self
            .tracking
            .add_point(NewTrackPoint {
                ficha_id: ficha_id.to_string(),
                driver_id: user.subject_id.clone(),
                latitude: request.latitude,
                longitude: request.longitude,
                accuracy: request.accuracy,
            })
            .await?;

        Ok(ApiResponse::success(point))
    }

    /// Resúmenes enriquecidos con los datos de su ficha
    ///
    /// Los motoristas solo ven sus propios puntos. Se descartan los resúmenes
    /// cuya ficha ya no existe.
    pub async fn summary(
        &self,
        user: &AuthenticatedUser,
    ) -> Result<Vec<TrackSummaryResponse>, AppError> {
        let mut summaries = self.tracking.summarize().await?;
        if !user.role.sees_all_records() {
            summaries.retain(|s| s.driver_id == user.subject_id);
        }

        let fichas: HashMap<String, Ficha> = self
            .fichas
            .list()
            .await?
            .into_iter()
            .map(|f| (f.id.clone(), f))
            .collect();

        Ok(summaries
            .into_iter()
            .filter_map(|summary| {
                let ficha = fichas.get(&summary.ficha_id)?;
                Some(TrackSummaryResponse {
                    ficha_id: summary.ficha_id,
                    driver_name: ficha.driver_name.clone(),
                    site_name: ficha.location.site_name.clone(),
                    container_count: ficha.container_count,
                    status: ficha.status,
                    total_points: summary.total_points,
                    latest_point: summary.latest_point,
                })
            })
            .collect())
    }
}
