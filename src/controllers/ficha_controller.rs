use tracing::info;
use validator::Validate;

use crate::dto::ficha_dto::{CreateFichaRequest, SignatureRequest, UpdateStatusRequest};
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::ficha::{Ficha, FichaStatus, NewFicha};
use crate::repositories::{FichaRepository, StatusUpdate};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, not_found_error, AppError};

pub struct FichaController {
    repository: FichaRepository,
}

impl FichaController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.fichas.clone(),
        }
    }

    /// Ficha visible para el usuario o el error correspondiente
    async fn find_accessible(
        &self,
        user: &AuthenticatedUser,
        id: &str,
        operation: &str,
    ) -> Result<Ficha, AppError> {
        let ficha = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Ficha", id))?;
        user.ensure_ficha_access(&ficha, operation)?;
        Ok(ficha)
    }

    pub async fn list(&self, user: &AuthenticatedUser) -> Result<Vec<Ficha>, AppError> {
        if user.role.sees_all_records() {
            self.repository.list().await
        } else {
            self.repository.list_by_driver(&user.subject_id).await
        }
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateFichaRequest,
    ) -> Result<ApiResponse<Ficha>, AppError> {
        request.validate()?;

        // El motorista siempre es quien está autenticado
        let ficha = self
            .repository
            .create(NewFicha {
                driver_id: user.subject_id.clone(),
                driver_name: user.name.clone(),
                container_count: request.container_count,
                location: request.location(),
                notes: request.notes(),
            })
            .await?;

        Ok(ApiResponse::success_with_message(
            ficha,
            "Ficha registrada exitosamente".to_string(),
        ))
    }

    pub async fn get(&self, user: &AuthenticatedUser, id: &str) -> Result<Ficha, AppError> {
        self.find_accessible(user, id, "ver la ficha").await
    }

    pub async fn update_status(
        &self,
        user: &AuthenticatedUser,
        id: &str,
        request: UpdateStatusRequest,
    ) -> Result<ApiResponse<Ficha>, AppError> {
        let status: FichaStatus = request
            .status
            .trim()
            .parse()
            .map_err(|e: String| bad_request_error(&e))?;

        self.find_accessible(user, id, "cambiar el estado").await?;

        // Una ficha finalizada no vuelve a abrirse
        let outcome = self
            .repository
            .update_status_if(id, status, |current| {
                !(current == FichaStatus::Finalized && status == FichaStatus::Open)
            })
            .await?
            .ok_or_else(|| not_found_error("Ficha", id))?;

        let ficha = match outcome {
            StatusUpdate::Updated(ficha) => ficha,
            StatusUpdate::Rejected { .. } => {
                return Err(AppError::Conflict(
                    "Una ficha finalizada no puede reabrirse".to_string(),
                ))
            }
        };

        info!(ficha_id = %ficha.id, status = ficha.status.as_str(), "📋 Estado de ficha actualizado");
        Ok(ApiResponse::success(ficha))
    }

    pub async fn attach_signature(
        &self,
        user: &AuthenticatedUser,
        id: &str,
        request: SignatureRequest,
    ) -> Result<ApiResponse<Ficha>, AppError> {
        self.find_accessible(user, id, "firmar la ficha").await?;
        request.validate()?;

        let ficha = self
            .repository
            .attach_signature(id, request.base64.trim())
            .await?
            .ok_or_else(|| not_found_error("Ficha", id))?;

        info!(ficha_id = %ficha.id, "✍️ Firma registrada");
        Ok(ApiResponse::success_with_message(
            ficha,
            "Firma registrada exitosamente".to_string(),
        ))
    }
}
