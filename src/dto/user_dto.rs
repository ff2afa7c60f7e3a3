use serde::Deserialize;
use validator::Validate;

use crate::models::user::{NewUser, Role};
use crate::utils::validation::validate_not_blank;

// Request para crear un usuario
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(custom = "validate_not_blank", length(max = 100))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    pub role: Role,

    #[validate(length(min = 6, max = 100))]
    pub password: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            name: request.name.trim().to_string(),
            email: request.email,
            role: request.role,
            password: request.password,
        }
    }
}
