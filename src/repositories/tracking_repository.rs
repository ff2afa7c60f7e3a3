use std::collections::HashMap;

use tracing::debug;

use crate::database::JsonStore;
use crate::models::tracking::{NewTrackPoint, TrackPoint, TrackSummary};
use crate::utils::errors::AppError;
use crate::utils::ids::generate_id;

pub const TRACKING_COLLECTION: &str = "tracking";

/// Log de puntos GPS, solo de añadido
#[derive(Clone)]
pub struct TrackingRepository {
    store: JsonStore,
}

impl TrackingRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    async fn load(&self) -> Result<Vec<TrackPoint>, AppError> {
        Ok(self.store.read_collection(TRACKING_COLLECTION, Vec::new()).await?)
    }

    /// Registrar un punto; no valida rangos de latitud/longitud
    pub async fn add_point(&self, input: NewTrackPoint) -> Result<TrackPoint, AppError> {
        let point = TrackPoint {
            id: generate_id(),
            ficha_id: input.ficha_id,
            driver_id: input.driver_id,
            created_at: chrono::Utc::now(),
            latitude: input.latitude,
            longitude: input.longitude,
            accuracy: input.accuracy,
        };

        let point = self
            .store
            .update(TRACKING_COLLECTION, |points: &mut Vec<TrackPoint>| {
                points.push(point.clone());
                Some(point)
            })
            .await?
            .ok_or_else(|| AppError::Internal("El punto no se pudo registrar".to_string()))?;

        debug!(ficha_id = %point.ficha_id, lat = point.latitude, lng = point.longitude, "📍 Punto registrado");
        Ok(point)
    }

    /// Puntos de una ficha en orden cronológico de llegada
    pub async fn list_by_ficha(&self, ficha_id: &str) -> Result<Vec<TrackPoint>, AppError> {
        Ok(self
            .load()
            .await?
            .into_iter()
            .filter(|p| p.ficha_id == ficha_id)
            .collect())
    }

    pub async fn summarize(&self) -> Result<Vec<TrackSummary>, AppError> {
        Ok(summarize_points(self.load().await?))
    }
}

/// Un resumen por ficha en orden de primera aparición
///
/// Con timestamps iguales se conserva el primer punto visto.
pub fn summarize_points(points: Vec<TrackPoint>) -> Vec<TrackSummary> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut summaries: Vec<TrackSummary> = Vec::new();

    for point in points {
        match index.get(&point.ficha_id).copied() {
            Some(i) => {
                let summary = &mut summaries[i];
                summary.total_points += 1;
                if point.created_at > summary.latest_point.created_at {
                    summary.latest_point = point;
                }
            }
            None => {
                index.insert(point.ficha_id.clone(), summaries.len());
                summaries.push(TrackSummary {
                    ficha_id: point.ficha_id.clone(),
                    driver_id: point.driver_id.clone(),
                    total_points: 1,
                    latest_point: point,
                });
            }
        }
    }

    summaries
}
