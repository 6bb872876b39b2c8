//! Repositorio de vehículos
//!
//! Acceso a la tabla `autos`. Los ids son secuenciales (max + 1),
//! asignados dentro de una transacción al crear.

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::vehicle::{CreateVehicleRequest, UpdateVehicleRequest, Vehicle, VehicleFilters};
use crate::utils::errors::AppError;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> Result<Vehicle, AppError> {
        let mut tx = self.pool.begin().await?;

        let (next_id,): (i64,) =
            sqlx::query_as("SELECT COALESCE(MAX(id), 0) + 1 FROM autos")
                .fetch_one(&mut *tx)
                .await?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO autos (
                id, marca, modelo, anio, tipo, color, placa, precio_dia,
                disponible, imagen, combustible, transmision, capacidad, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE, $9, $10, $11, $12, now())
            RETURNING *
            "#,
        )
        .bind(next_id)
        .bind(&request.marca)
        .bind(&request.modelo)
        .bind(request.anio)
        .bind(&request.tipo)
        .bind(&request.color)
        .bind(&request.placa)
        .bind(request.precio_dia)
        .bind(&request.imagen)
        .bind(&request.combustible)
        .bind(&request.transmision)
        .bind(request.capacidad)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>, AppError> {
        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM autos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(vehicle)
    }

    pub async fn find_all(&self) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>("SELECT * FROM autos ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(vehicles)
    }

    /// Solo los ids, para la reconciliación del catálogo
    pub async fn find_ids(&self) -> Result<Vec<i64>, AppError> {
        let rows: Vec<(i64,)> = sqlx::query_as("SELECT id FROM autos ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    /// Vehículos por lista de ids, preservando el orden de la lista
    pub async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM autos WHERE id = ANY($1) ORDER BY array_position($1, id)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn search(&self, filters: &VehicleFilters) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT * FROM autos
            WHERE ($1::text IS NULL OR marca ILIKE $1)
              AND ($2::text IS NULL OR tipo ILIKE $2)
              AND ($3::numeric IS NULL OR precio_dia >= $3)
              AND ($4::numeric IS NULL OR precio_dia <= $4)
              AND ($5::text IS NULL OR combustible ILIKE $5)
              AND ($6::text IS NULL OR transmision ILIKE $6)
              AND ($7::int IS NULL OR capacidad >= $7)
              AND ($8::bool IS NULL OR disponible = $8)
            ORDER BY id
            "#,
        )
        .bind(filters.marca.as_ref().map(|m| format!("%{}%", m)))
        .bind(filters.tipo.as_ref().map(|t| format!("%{}%", t)))
        .bind(filters.precio_min)
        .bind(filters.precio_max)
        .bind(filters.combustible.as_ref().map(|c| format!("%{}%", c)))
        .bind(filters.transmision.as_ref().map(|t| format!("%{}%", t)))
        .bind(filters.capacidad)
        .bind(filters.disponible)
        .fetch_all(&self.pool)
        .await?;

        Ok(vehicles)
    }

    pub async fn placa_exists(
        &self,
        placa: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM autos WHERE placa = $1 AND ($2::bigint IS NULL OR id <> $2))",
        )
        .bind(placa)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateVehicleRequest,
    ) -> Result<Vehicle, AppError> {
        // Obtener vehículo actual para el merge parcial
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let precio_dia: Decimal = request.precio_dia.unwrap_or(current.precio_dia);

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE autos
            SET marca = $2, modelo = $3, anio = $4, tipo = $5, color = $6,
                placa = $7, precio_dia = $8, disponible = $9, imagen = $10,
                combustible = $11, transmision = $12, capacidad = $13
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.marca.unwrap_or(current.marca))
        .bind(request.modelo.unwrap_or(current.modelo))
        .bind(request.anio.unwrap_or(current.anio))
        .bind(request.tipo.unwrap_or(current.tipo))
        .bind(request.color.or(current.color))
        .bind(request.placa.unwrap_or(current.placa))
        .bind(precio_dia)
        .bind(request.disponible.unwrap_or(current.disponible))
        .bind(request.imagen.or(current.imagen))
        .bind(request.combustible.or(current.combustible))
        .bind(request.transmision.or(current.transmision))
        .bind(request.capacidad.or(current.capacidad))
        .fetch_one(&self.pool)
        .await?;

        Ok(vehicle)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM autos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
        }

        Ok(())
    }

    /// Cambio directo del flag de disponibilidad (usado por la cancelación,
    /// fuera de la transacción de reserva)
    pub async fn set_disponible(&self, id: i64, disponible: bool) -> Result<(), AppError> {
        sqlx::query("UPDATE autos SET disponible = $2 WHERE id = $1")
            .bind(id)
            .bind(disponible)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
