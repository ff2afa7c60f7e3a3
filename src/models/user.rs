//! Modelo de User
//! 
//! Usuarios del sistema con su rol. El hash de la contraseña solo vive en el
//! documento almacenado; hacia fuera se expone `UserResponse`.

use serde::{Deserialize, Serialize};

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[serde(alias = "motorista")]
    Driver,
    #[serde(alias = "operador")]
    Operator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Driver => "driver",
            Role::Operator => "operator",
        }
    }

    /// Admin y operador pueden ver los registros de todos los motoristas
    pub fn sees_all_records(&self) -> bool {
        matches!(self, Role::Admin | Role::Operator)
    }
}

/// User tal como se guarda en la colección `users`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(alias = "nome")]
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(alias = "passwordHash")]
    pub password_hash: String,
}

/// Datos para crear un usuario
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password: String,
}

/// Response de usuario para la API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}
