//! Modelo de User
//!
//! Este módulo contiene el struct User y sus variantes.
//! El hash de contraseña nunca se serializa en las respuestas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// User - mapea exactamente a la tabla usuarios
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub rol: String,
    pub telefono: Option<String>,
    pub tipo_documento: Option<String>,
    pub numero_documento: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.rol == "admin"
    }
}

/// Request de registro de usuario
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100))]
    pub nombre: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 100))]
    pub password: String,

    pub telefono: Option<String>,
    pub tipo_documento: Option<String>,
    pub numero_documento: Option<String>,
}

/// Request para actualizar el perfil de un usuario
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 100))]
    pub nombre: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(min = 6, max = 100))]
    pub password: Option<String>,

    pub telefono: Option<String>,
    pub tipo_documento: Option<String>,
    pub numero_documento: Option<String>,
}

/// Response de usuario para la API (sin credenciales)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub nombre: String,
    pub email: String,
    pub rol: String,
    pub telefono: Option<String>,
    pub tipo_documento: Option<String>,
    pub numero_documento: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nombre: user.nombre,
            email: user.email,
            rol: user.rol,
            telefono: user.telefono,
            tipo_documento: user.tipo_documento,
            numero_documento: user.numero_documento,
            created_at: user.created_at,
        }
    }
}
