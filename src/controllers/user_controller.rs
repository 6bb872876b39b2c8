//! Controller de usuarios
//!
//! Perfil propio o admin para lectura/actualización; listado y borrado
//! solo admin (el gate de rol lo aplica el router, acá se verifica la
//! propiedad del recurso).

use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::user::{RegisterRequest, UpdateUserRequest, UserResponse};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;

pub struct UserController {
    repository: UserRepository,
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    /// Alta directa de un usuario (misma validación que el registro,
    /// sin emitir token)
    pub async fn create(
        &self,
        request: RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate()?;

        if self.repository.email_exists(&request.email, None).await? {
            return Err(AppError::Conflict("El email ya está registrado".to_string()));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))?;

        let user = self
            .repository
            .create(
                &request.nombre,
                &request.email,
                &password_hash,
                request.telefono,
                request.tipo_documento,
                request.numero_documento,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            UserResponse::from(user),
            "Usuario creado exitosamente".to_string(),
        ))
    }

    pub async fn list(&self) -> Result<Vec<UserResponse>, AppError> {
        let users = self.repository.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn get_by_id(
        &self,
        id: i64,
        actor: &AuthenticatedUser,
    ) -> Result<UserResponse, AppError> {
        if actor.id != id && !actor.is_admin() {
            return Err(AppError::Forbidden(
                "No tienes permiso para ver este perfil".to_string(),
            ));
        }

        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        Ok(UserResponse::from(user))
    }

    pub async fn update(
        &self,
        id: i64,
        actor: &AuthenticatedUser,
        request: UpdateUserRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        if actor.id != id && !actor.is_admin() {
            return Err(AppError::Forbidden(
                "No tienes permiso para modificar este perfil".to_string(),
            ));
        }

        request.validate()?;

        if let Some(ref email) = request.email {
            if self.repository.email_exists(email, Some(id)).await? {
                return Err(AppError::Conflict("El email ya está registrado".to_string()));
            }
        }

        // El password nunca viaja en claro a la base
        let password_hash = match request.password {
            Some(ref password) => Some(
                hash(password, DEFAULT_COST)
                    .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))?,
            ),
            None => None,
        };

        let user = self
            .repository
            .update(
                id,
                request.nombre,
                request.email,
                password_hash,
                request.telefono,
                request.tipo_documento,
                request.numero_documento,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            UserResponse::from(user),
            "Perfil actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
