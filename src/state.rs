//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::database::{CollectionBackend, JsonStore};
use crate::repositories::{BootstrapAdmin, FichaRepository, TrackingRepository, UserRepository};
use crate::services::field_cipher::FieldCipher;
use crate::utils::errors::AppError;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub jwt: JwtConfig,
    pub fichas: FichaRepository,
    pub tracking: TrackingRepository,
    pub users: UserRepository,
}

impl AppState {
    /// Los tres repositorios comparten un mismo almacén (y su lock de escritura)
    pub fn new(config: EnvironmentConfig, backend: Arc<dyn CollectionBackend>) -> Self {
        let store = JsonStore::new(backend, config.failure_policy);
        let cipher = FieldCipher::new(config.cipher_config());

        Self {
            jwt: JwtConfig::from(&config),
            fichas: FichaRepository::new(store.clone(), cipher),
            tracking: TrackingRepository::new(store.clone()),
            users: UserRepository::new(store),
            config,
        }
    }

    /// Crear el administrador configurado si aún no existe ningún usuario
    pub async fn bootstrap_admin(&self) -> Result<bool, AppError> {
        let admin = BootstrapAdmin {
            name: "Administrador".to_string(),
            email: self.config.admin_email.clone(),
            password: self.config.admin_password.clone(),
        };
        self.users.ensure_admin(&admin).await
    }
}
