use tracing::info;

use crate::database::JsonStore;
use crate::models::user::{NewUser, Role, User, UserResponse};
use crate::services::password_service::{hash_password, verify_password};
use crate::utils::errors::{conflict_error, AppError};
use crate::utils::ids::generate_id;

pub const USERS_COLLECTION: &str = "users";

/// Credenciales del administrador inicial
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone)]
pub struct UserRepository {
    store: JsonStore,
}

impl UserRepository {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    async fn load(&self) -> Result<Vec<User>, AppError> {
        Ok(self.store.read_collection(USERS_COLLECTION, Vec::new()).await?)
    }

    /// Crear el admin inicial solo si no hay ningún usuario
    ///
    /// Devuelve `true` si lo creó.
    pub async fn ensure_admin(&self, admin: &BootstrapAdmin) -> Result<bool, AppError> {
        if !self.load().await?.is_empty() {
            return Ok(false);
        }

        let user = User {
            id: generate_id(),
            name: admin.name.clone(),
            email: admin.email.clone(),
            role: Role::Admin,
            password_hash: hash_password(&admin.password).await?,
        };

        let created = self
            .store
            .update(USERS_COLLECTION, |users: &mut Vec<User>| {
                if !users.is_empty() {
                    return None;
                }
                users.push(user);
                Some(())
            })
            .await?
            .is_some();

        if created {
            info!(email = %admin.email, "👤 Administrador inicial creado");
        }
        Ok(created)
    }

    /// Usuarios sin hash de contraseña
    pub async fn list(&self) -> Result<Vec<UserResponse>, AppError> {
        Ok(self.load().await?.into_iter().map(UserResponse::from).collect())
    }

    /// Crear un usuario; el email debe ser único (distingue mayúsculas)
    pub async fn create(&self, input: NewUser) -> Result<UserResponse, AppError> {
        let NewUser {
            name,
            email,
            role,
            password,
        } = input;

        if self.load().await?.iter().any(|u| u.email == email) {
            return Err(conflict_error("User", "email", &email));
        }

        let user = User {
            id: generate_id(),
            name,
            email,
            role,
            password_hash: hash_password(&password).await?,
        };

        // Unicidad comprobada otra vez bajo el lock del almacén
        let email = user.email.clone();
        let created = self
            .store
            .update(USERS_COLLECTION, |users: &mut Vec<User>| {
                if users.iter().any(|u| u.email == user.email) {
                    return None;
                }
                users.push(user.clone());
                Some(user)
            })
            .await?
            .ok_or_else(|| conflict_error("User", "email", &email))?;

        info!(user_id = %created.id, role = created.role.as_str(), "👤 Usuario creado");
        Ok(created.into())
    }

    /// Buscar por email exacto y verificar la contraseña
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, AppError> {
        let Some(user) = self.load().await?.into_iter().find(|u| u.email == email) else {
            return Ok(None);
        };

        if verify_password(password, &user.password_hash).await {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}
