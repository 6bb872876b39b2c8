//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP con el envelope JSON uniforme.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error con el mismo envelope que las respuestas exitosas:
/// `{ success: false, message, error }`
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

fn is_development() -> bool {
    std::env::var("ENVIRONMENT")
        .map(|e| e == "development")
        .unwrap_or(false)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                tracing::error!("Error de base de datos: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        success: false,
                        message: "Error interno del servidor".to_string(),
                        error: "DB_ERROR".to_string(),
                        details: is_development().then(|| json!({ "sql_error": e.to_string() })),
                    },
                )
            }

            AppError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    success: false,
                    message: "Los datos proporcionados no son válidos".to_string(),
                    error: "VALIDATION_ERROR".to_string(),
                    details: Some(json!(e)),
                },
            ),

            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    success: false,
                    message: msg,
                    error: "BAD_REQUEST".to_string(),
                    details: None,
                },
            ),

            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    success: false,
                    message: msg,
                    error: "UNAUTHORIZED".to_string(),
                    details: None,
                },
            ),

            AppError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                ErrorResponse {
                    success: false,
                    message: msg,
                    error: "FORBIDDEN".to_string(),
                    details: None,
                },
            ),

            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    success: false,
                    message: msg,
                    error: "NOT_FOUND".to_string(),
                    details: None,
                },
            ),

            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorResponse {
                    success: false,
                    message: msg,
                    error: "CONFLICT".to_string(),
                    details: None,
                },
            ),

            AppError::Jwt(msg) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse {
                    success: false,
                    message: msg,
                    error: "JWT_ERROR".to_string(),
                    details: None,
                },
            ),

            AppError::Internal(msg) => {
                tracing::error!("Error interno: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        success: false,
                        message: "Ocurrió un error inesperado".to_string(),
                        error: "INTERNAL_ERROR".to_string(),
                        details: is_development().then(|| json!({ "internal_error": msg })),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: i64) -> AppError {
    AppError::NotFound(format!("{} con id '{}' no encontrado", resource, id))
}

/// Función helper para crear errores de conflicto
pub fn conflict_error(resource: &str, field: &str, value: &str) -> AppError {
    AppError::Conflict(format!("{} con {} '{}' ya existe", resource, field, value))
}
