//! Middleware de autenticación JWT
//!
//! Este módulo maneja la autenticación JWT, extracción de tokens
//! (header `Authorization` o cookie de sesión) y las reglas de acceso por rol.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{
    models::{ficha::Ficha, user::Role},
    state::AppState,
    utils::{
        errors::{forbidden_error, AppError},
        jwt::{extract_token_from_cookies, extract_token_from_header, verify_token},
    },
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub subject_id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl AuthenticatedUser {
    /// Admin y operador ven cualquier ficha; el motorista solo las suyas
    pub fn can_access_ficha(&self, ficha: &Ficha) -> bool {
        self.role.sees_all_records() || ficha.driver_id == self.subject_id
    }

    pub fn ensure_ficha_access(&self, ficha: &Ficha, operation: &str) -> Result<(), AppError> {
        if self.can_access_ficha(ficha) {
            Ok(())
        } else {
            Err(forbidden_error(operation, "la ficha pertenece a otro motorista"))
        }
    }

    pub fn ensure_admin(&self) -> Result<(), AppError> {
        if self.role != Role::Admin {
            return Err(AppError::Forbidden(
                "Se requieren permisos de administrador".to_string(),
            ));
        }
        Ok(())
    }
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let headers = request.headers();

    let token = match headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    {
        Some(auth_header) => extract_token_from_header(auth_header)?.to_string(),
        None => headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(extract_token_from_cookies)
            .map(str::to_string)
            .ok_or_else(|| AppError::Unauthorized("No autenticado".to_string()))?,
    };

    let claims = verify_token(&token, &state.jwt)
        .map_err(|_| AppError::Unauthorized("Token inválido o expirado".to_string()))?;

    // Inyectar usuario autenticado en las extensions
    request.extensions_mut().insert(AuthenticatedUser {
        subject_id: claims.sub,
        email: claims.email,
        name: claims.name,
        role: claims.role,
    });

    Ok(next.run(request).await)
}
