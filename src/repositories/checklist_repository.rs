//! Repositorio de checklists de condición
//!
//! El registro por defecto se materializa en el primer acceso a un
//! vehículo sin checklist.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::checklist::{Checklist, DamageAnnotation, InventoryItem};
use crate::utils::errors::AppError;

pub struct ChecklistRepository {
    pool: PgPool,
}

impl ChecklistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_vehicle(&self, vehiculo_id: i64) -> Result<Option<Checklist>, AppError> {
        let checklist =
            sqlx::query_as::<_, Checklist>("SELECT * FROM checklists WHERE vehiculo_id = $1")
                .bind(vehiculo_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(checklist)
    }

    pub async fn find_all(&self) -> Result<Vec<Checklist>, AppError> {
        let checklists =
            sqlx::query_as::<_, Checklist>("SELECT * FROM checklists ORDER BY vehiculo_id")
                .fetch_all(&self.pool)
                .await?;

        Ok(checklists)
    }

    /// Insertar el registro por defecto para un auto. Si otro request lo
    /// materializó primero, devuelve el existente.
    pub async fn create_default(&self, vehiculo_id: i64) -> Result<Checklist, AppError> {
        let default = Checklist::default_for(vehiculo_id);

        let checklist = sqlx::query_as::<_, Checklist>(
            r#"
            INSERT INTO checklists (
                vehiculo_id, combustible_nivel, combustible_porcentaje,
                danos, inventario, condicion_general, observaciones, ultima_revision
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, now())
            ON CONFLICT (vehiculo_id) DO UPDATE SET vehiculo_id = checklists.vehiculo_id
            RETURNING *
            "#,
        )
        .bind(vehiculo_id)
        .bind(&default.combustible_nivel)
        .bind(default.combustible_porcentaje)
        .bind(&default.danos)
        .bind(&default.inventario)
        .bind(&default.condicion_general)
        .bind(&default.observaciones)
        .fetch_one(&self.pool)
        .await?;

        Ok(checklist)
    }

    /// Actualización parcial: solo los campos provistos, refrescando
    /// siempre `ultima_revision`
    pub async fn update_fields(
        &self,
        vehiculo_id: i64,
        combustible_nivel: Option<String>,
        combustible_porcentaje: Option<i32>,
        inventario: Option<Vec<InventoryItem>>,
        condicion_general: Option<String>,
        observaciones: Option<String>,
    ) -> Result<Checklist, AppError> {
        let current = self
            .find_by_vehicle(vehiculo_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Checklist no encontrado".to_string()))?;

        let checklist = sqlx::query_as::<_, Checklist>(
            r#"
            UPDATE checklists
            SET combustible_nivel = $2, combustible_porcentaje = $3,
                inventario = $4, condicion_general = $5, observaciones = $6,
                ultima_revision = $7
            WHERE vehiculo_id = $1
            RETURNING *
            "#,
        )
        .bind(vehiculo_id)
        .bind(combustible_nivel.unwrap_or(current.combustible_nivel))
        .bind(combustible_porcentaje.unwrap_or(current.combustible_porcentaje))
        .bind(inventario.map(Json).unwrap_or(current.inventario))
        .bind(condicion_general.unwrap_or(current.condicion_general))
        .bind(observaciones.unwrap_or(current.observaciones))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(checklist)
    }

    /// Reemplazar la lista de daños completa (alta y baja de anotaciones)
    pub async fn save_danos(
        &self,
        vehiculo_id: i64,
        danos: Vec<DamageAnnotation>,
    ) -> Result<Checklist, AppError> {
        let checklist = sqlx::query_as::<_, Checklist>(
            r#"
            UPDATE checklists
            SET danos = $2, ultima_revision = $3
            WHERE vehiculo_id = $1
            RETURNING *
            "#,
        )
        .bind(vehiculo_id)
        .bind(Json(danos))
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Checklist no encontrado".to_string()))?;

        Ok(checklist)
    }

    pub async fn delete(&self, vehiculo_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM checklists WHERE vehiculo_id = $1")
            .bind(vehiculo_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Checklist no encontrado".to_string()));
        }

        Ok(())
    }
}
