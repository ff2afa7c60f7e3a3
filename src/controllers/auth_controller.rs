use tracing::{info, warn};
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, MeResponse};
use crate::middleware::auth::AuthenticatedUser;
use crate::repositories::UserRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    users: UserRepository,
    jwt: JwtConfig,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: state.users.clone(),
            jwt: state.jwt.clone(),
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        request.validate()?;

        let user = self
            .users
            .authenticate(request.email.trim(), &request.password)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "🔒 Credenciales inválidas");
                AppError::Unauthorized("Email o contraseña incorrectos".to_string())
            })?;

        let token = generate_token(&user, &self.jwt)?;
        info!(user_id = %user.id, role = user.role.as_str(), "🔑 Sesión iniciada");

        Ok(LoginResponse {
            token,
            expires_in: self.jwt.expiration,
            user: user.into(),
        })
    }

    pub fn me(&self, user: &AuthenticatedUser) -> MeResponse {
        MeResponse {
            id: user.subject_id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}
