use serde::Deserialize;
use validator::Validate;

use crate::models::ficha::Location;
use crate::utils::validation::{validate_not_blank, validate_signature_payload};

// Request para registrar una ficha de recogida
#[derive(Debug, Deserialize, Validate)]
pub struct CreateFichaRequest {
    #[validate(custom = "validate_not_blank")]
    pub site_name: String,
    #[validate(custom = "validate_not_blank")]
    pub address: String,
    #[validate(custom = "validate_not_blank")]
    pub city: String,
    #[validate(custom = "validate_not_blank")]
    pub state: String,
    #[validate(custom = "validate_not_blank")]
    pub postal_code: String,
    #[validate(custom = "validate_not_blank")]
    pub responsible_name: String,
    #[validate(custom = "validate_not_blank")]
    pub responsible_phone: String,
    #[validate(range(min = 1))]
    pub container_count: u32,
    pub notes: Option<String>,
}

impl CreateFichaRequest {
    pub fn location(&self) -> Location {
        Location {
            site_name: self.site_name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            postal_code: self.postal_code.clone(),
            responsible_name: self.responsible_name.clone(),
            responsible_phone: self.responsible_phone.clone(),
        }
    }

    /// Notas vacías cuentan como ausentes
    pub fn notes(&self) -> Option<String> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
    }
}

// Request para cambiar el estado
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

// Request con la firma capturada (base64 o data URL)
#[derive(Debug, Deserialize, Validate)]
pub struct SignatureRequest {
    #[validate(custom = "validate_signature_payload")]
    pub base64: String,
}
