//! Utilidades de validación
//!
//! Validadores personalizados usados por los DTOs de entrada. La capa de
//! repositorios no valida nada: todo se rechaza aquí antes de llegar a ella.

use base64::{engine::general_purpose::STANDARD, Engine};
use validator::ValidationError;

/// Validar que un string no esté vacío ni sea solo espacios
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Validar la carga de una firma capturada en el canvas
///
/// Acepta base64 puro o una data URL (`data:image/png;base64,...`).
pub fn validate_signature_payload(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::new("signature_empty"));
    }

    let encoded = match value.strip_prefix("data:") {
        Some(rest) => match rest.split_once(";base64,") {
            Some((mime, data)) if mime.starts_with("image/") => data,
            _ => return Err(ValidationError::new("signature_data_url")),
        },
        None => value,
    };

    if encoded.is_empty() || STANDARD.decode(encoded).is_err() {
        return Err(ValidationError::new("signature_base64"));
    }

    Ok(())
}
