//! Modelos de rastreo GPS
//! 
//! `TrackPoint` es inmutable una vez creado; `TrackSummary` es una proyección
//! calculada al vuelo, nunca se persiste.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Una muestra GPS reportada por un motorista
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub id: String,
    #[serde(alias = "fichaId")]
    pub ficha_id: String,
    #[serde(alias = "motoristaId")]
    pub driver_id: String,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    /// Radio de precisión en metros
    #[serde(default)]
    pub accuracy: Option<f64>,
}

/// Datos para registrar un punto
#[derive(Debug, Clone)]
pub struct NewTrackPoint {
    pub ficha_id: String,
    pub driver_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
}

/// Resumen por ficha: total de puntos y el más reciente
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackSummary {
    pub ficha_id: String,
    pub driver_id: String,
    pub total_points: usize,
    pub latest_point: TrackPoint,
}
