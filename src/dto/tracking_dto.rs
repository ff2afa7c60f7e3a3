use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::ficha::FichaStatus;
use crate::models::tracking::TrackPoint;
use crate::utils::validation::validate_not_blank;

// Request para reportar una posición
#[derive(Debug, Deserialize, Validate)]
pub struct AddPointRequest {
    #[validate(custom = "validate_not_blank")]
    pub ficha_id: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = 0.0))]
    pub accuracy: Option<f64>,
}

// Query para listar los puntos de una ficha
#[derive(Debug, Deserialize)]
pub struct TrackingQuery {
    pub ficha_id: Option<String>,
}

// Resumen de rastreo enriquecido con los datos de la ficha
#[derive(Debug, Serialize, Deserialize)]
pub struct TrackSummaryResponse {
    pub ficha_id: String,
    pub driver_name: String,
    pub site_name: String,
    pub container_count: u32,
    pub status: FichaStatus,
    pub total_points: usize,
    pub latest_point: TrackPoint,
}
