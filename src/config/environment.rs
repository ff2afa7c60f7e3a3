//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Todas las variables tienen un valor por defecto de desarrollo para que el
//! servicio arranque sin archivo `.env`.

use std::env;
use std::path::PathBuf;

use crate::services::field_cipher::FieldCipherConfig;

/// Política ante fallos de almacenamiento o descifrado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Degradar a valor por defecto / cadena vacía y registrar el fallo
    Lenient,
    /// Propagar el error al llamador
    Strict,
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub data_dir: PathBuf,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub encryption_key: String,
    pub encryption_iv: String,
    pub cors_origins: Vec<String>,
    pub failure_policy: FailurePolicy,
    pub admin_email: String,
    pub admin_password: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let default_data_dir = if environment == "production" {
            "/tmp/bombona-data"
        } else {
            "./data"
        };

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(default_data_dir)),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "dev-secret".to_string()),
            jwt_expiration: env::var("JWT_EXPIRATION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60 * 60 * 8),
            encryption_key: env::var("ENCRYPTION_KEY")
                .unwrap_or_else(|_| "32_chars_abcdefghijklmnopqrstuvw".to_string()),
            encryption_iv: env::var("ENCRYPTION_IV")
                .unwrap_or_else(|_| "16_chars_iv_1234".to_string()),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            failure_policy: match env::var("STRICT_STORAGE").as_deref() {
                Ok("true") | Ok("1") => FailurePolicy::Strict,
                _ => FailurePolicy::Lenient,
            },
            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@bioacess.local".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
            environment,
        }
    }
}

impl EnvironmentConfig {
    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Material de clave para el cifrado de campos protegidos
    pub fn cipher_config(&self) -> FieldCipherConfig {
        FieldCipherConfig::from_secrets(&self.encryption_key, &self.encryption_iv)
    }
}
