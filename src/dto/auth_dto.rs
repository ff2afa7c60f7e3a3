use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::UserResponse;
use crate::utils::validation::validate_not_blank;

// Login request; los campos ausentes llegan vacíos y los rechaza la validación
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub email: String,
    #[serde(default)]
    #[validate(custom = "validate_not_blank")]
    pub password: String,
}

// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

// Identidad de la sesión actual
#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: crate::models::user::Role,
}
