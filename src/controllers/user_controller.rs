use validator::Validate;

use crate::dto::user_dto::CreateUserRequest;
use crate::dto::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::UserResponse;
use crate::repositories::UserRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct UserController {
    repository: UserRepository,
}

impl UserController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.users.clone(),
        }
    }

    pub async fn list(&self, user: &AuthenticatedUser) -> Result<Vec<UserResponse>, AppError> {
        user.ensure_admin()?;
        self.repository.list().await
    }

    pub async fn create(
        &self,
        user: &AuthenticatedUser,
        request: CreateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        user.ensure_admin()?;
        request.validate()?;

        let created = self.repository.create(request.into()).await?;

        Ok(ApiResponse::success_with_message(
            created,
            "Usuario creado exitosamente".to_string(),
        ))
    }
}
