//! Repositorio de reservas
//!
//! Contiene la transacción de reserva: el insert de la reserva y el
//! cambio del flag `disponible` del auto se confirman o deshacen juntos.
//! El lock de fila sobre el auto serializa intentos concurrentes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::reservation::{PaymentMethod, Reservation, ReservationStatus};
use crate::models::vehicle::Vehicle;
use crate::utils::errors::AppError;

pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear una reserva y marcar el auto como no disponible, como una
    /// unidad atómica. Cualquier error antes del commit revierte ambos
    /// escritos.
    pub async fn create_booking(
        &self,
        usuario_id: i64,
        auto_id: i64,
        fecha_inicio: NaiveDate,
        fecha_fin: NaiveDate,
        precio_total: Decimal,
        estado_inicial: ReservationStatus,
        metodo_pago: Option<PaymentMethod>,
    ) -> Result<Reservation, AppError> {
        let mut tx = self.pool.begin().await?;

        // Lock de fila: dos intentos concurrentes sobre el mismo auto se
        // serializan aquí y el segundo ve el flag ya apagado
        let auto = sqlx::query_as::<_, Vehicle>("SELECT * FROM autos WHERE id = $1 FOR UPDATE")
            .bind(auto_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        if !auto.disponible {
            return Err(AppError::Conflict(
                "El vehículo no está disponible".to_string(),
            ));
        }

        // Re-chequeo de solape dentro de la transacción: misma condición
        // que availability_service::ranges_overlap
        let (conflictos,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM reservas
            WHERE auto_id = $1
              AND estado <> 'Cancelada'
              AND fecha_inicio <= $3
              AND fecha_fin >= $2
            "#,
        )
        .bind(auto_id)
        .bind(fecha_inicio)
        .bind(fecha_fin)
        .fetch_one(&mut *tx)
        .await?;

        if conflictos > 0 {
            return Err(AppError::Conflict(
                "El vehículo ya tiene una reserva en ese rango de fechas".to_string(),
            ));
        }

        let (next_id,): (i64,) =
            sqlx::query_as("SELECT COALESCE(MAX(id), 0) + 1 FROM reservas")
                .fetch_one(&mut *tx)
                .await?;

        let reserva = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservas (
                id, usuario_id, auto_id, fecha_inicio, fecha_fin,
                precio_total, estado, metodo_pago, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, now())
            RETURNING *
            "#,
        )
        .bind(next_id)
        .bind(usuario_id)
        .bind(auto_id)
        .bind(fecha_inicio)
        .bind(fecha_fin)
        .bind(precio_total)
        .bind(estado_inicial.as_str())
        .bind(metodo_pago.map(Json))
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE autos SET disponible = FALSE WHERE id = $1")
            .bind(auto_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(reserva)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, AppError> {
        let reserva = sqlx::query_as::<_, Reservation>("SELECT * FROM reservas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(reserva)
    }

    pub async fn find_all(&self) -> Result<Vec<Reservation>, AppError> {
        let reservas =
            sqlx::query_as::<_, Reservation>("SELECT * FROM reservas ORDER BY id DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(reservas)
    }

    pub async fn find_by_user(&self, usuario_id: i64) -> Result<Vec<Reservation>, AppError> {
        let reservas = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservas WHERE usuario_id = $1 ORDER BY id DESC",
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservas)
    }

    /// Reservas no canceladas del auto que solapan el rango candidato
    pub async fn find_conflicts(
        &self,
        auto_id: i64,
        fecha_inicio: NaiveDate,
        fecha_fin: NaiveDate,
    ) -> Result<Vec<Reservation>, AppError> {
        let reservas = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT * FROM reservas
            WHERE auto_id = $1
              AND estado <> 'Cancelada'
              AND fecha_inicio <= $3
              AND fecha_fin >= $2
            ORDER BY fecha_inicio
            "#,
        )
        .bind(auto_id)
        .bind(fecha_inicio)
        .bind(fecha_fin)
        .fetch_all(&self.pool)
        .await?;

        Ok(reservas)
    }

    pub async fn update_estado(
        &self,
        id: i64,
        estado: ReservationStatus,
    ) -> Result<Reservation, AppError> {
        let reserva = sqlx::query_as::<_, Reservation>(
            "UPDATE reservas SET estado = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(estado.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        Ok(reserva)
    }
}
