//! Controller de autenticación
//!
//! Registro y login de usuarios, con hash bcrypt y emisión de JWT.

use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, LoginRequest};
use crate::dto::common::ApiResponse;
use crate::models::user::{RegisterRequest, UserResponse};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    repository: UserRepository,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt_config,
        }
    }

    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<ApiResponse<AuthResponse>, AppError> {
        request.validate()?;

        // Verificar que el email no exista (case-insensitive)
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

        let token = generate_token(user.id, &user.email, &user.rol, &self.jwt_config)?;

        Ok(ApiResponse::success_with_message(
            AuthResponse {
                token,
                usuario: UserResponse::from(user),
            },
            "Usuario registrado exitosamente".to_string(),
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<ApiResponse<AuthResponse>, AppError> {
        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let token = generate_token(user.id, &user.email, &user.rol, &self.jwt_config)?;

        Ok(ApiResponse::success(AuthResponse {
            token,
            usuario: UserResponse::from(user),
        }))
    }
}
