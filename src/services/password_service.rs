//! Hash y verificación de contraseñas
//!
//! bcrypt con coste 10. El hash se ejecuta en el pool bloqueante de tokio
//! para no frenar el runtime.

use bcrypt::{hash, verify};

use crate::utils::errors::AppError;

pub const PASSWORD_COST: u32 = 10;

/// Generar el hash de una contraseña
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hash(password, PASSWORD_COST))
        .await
        .map_err(|e| AppError::Internal(format!("Tarea de hash abortada: {}", e)))?
        .map_err(|e| AppError::Hash(format!("Error hasheando password: {}", e)))
}

/// Verificar una contraseña contra su hash
///
/// Un hash corrupto cuenta como contraseña incorrecta.
pub async fn verify_password(password: &str, password_hash: &str) -> bool {
    let password = password.to_string();
    let password_hash = password_hash.to_string();
    tokio::task::spawn_blocking(move || verify(password, &password_hash).unwrap_or(false))
        .await
        .unwrap_or(false)
}
