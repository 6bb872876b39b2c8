//! Repositorio de usuarios
//!
//! Acceso a la tabla `usuarios`. El email es único y se compara en
//! minúsculas; el hash de contraseña llega ya calculado desde el
//! controller.

use sqlx::PgPool;

use crate::models::user::User;
use crate::utils::errors::AppError;

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        nombre: &str,
        email: &str,
        password_hash: &str,
        telefono: Option<String>,
        tipo_documento: Option<String>,
        numero_documento: Option<String>,
    ) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        let (next_id,): (i64,) =
            sqlx::query_as("SELECT COALESCE(MAX(id), 0) + 1 FROM usuarios")
                .fetch_one(&mut *tx)
                .await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO usuarios (
                id, nombre, email, password_hash, rol, telefono,
                tipo_documento, numero_documento, created_at
            )
            VALUES ($1, $2, $3, $4, 'cliente', $5, $6, $7, now())
            RETURNING *
            "#,
        )
        .bind(next_id)
        .bind(nombre)
        .bind(email.to_lowercase())
        .bind(password_hash)
        .bind(telefono)
        .bind(tipo_documento)
        .bind(numero_documento)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM usuarios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM usuarios WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    pub async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM usuarios WHERE LOWER(email) = LOWER($1) AND ($2::bigint IS NULL OR id <> $2))",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM usuarios ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    pub async fn update(
        &self,
        id: i64,
        nombre: Option<String>,
        email: Option<String>,
        password_hash: Option<String>,
        telefono: Option<String>,
        tipo_documento: Option<String>,
        numero_documento: Option<String>,
    ) -> Result<User, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE usuarios
            SET nombre = $2, email = $3, password_hash = $4, telefono = $5,
                tipo_documento = $6, numero_documento = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nombre.unwrap_or(current.nombre))
        .bind(email.map(|e| e.to_lowercase()).unwrap_or(current.email))
        .bind(password_hash.unwrap_or(current.password_hash))
        .bind(telefono.or(current.telefono))
        .bind(tipo_documento.or(current.tipo_documento))
        .bind(numero_documento.or(current.numero_documento))
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Usuario no encontrado".to_string()));
        }

        Ok(())
    }
}
