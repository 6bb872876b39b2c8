//! Controller de reservas
//!
//! Orquesta la cotización, la transacción de reserva, la cancelación
//! y la factura.

use sqlx::PgPool;

use crate::dto::common::ApiResponse;
use crate::dto::reservation_dto::{
    AvailabilityResponse, CreateReservationRequest, InvoiceResponse, QuoteRequest,
};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::reservation::{Reservation, ReservationStatus};
use crate::repositories::reservation_repository::ReservationRepository;
use crate::repositories::user_repository::UserRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::invoice_service;
use crate::services::pricing_service::{self, PriceBreakdown};
use crate::utils::errors::AppError;

pub struct ReservationController {
    reservations: ReservationRepository,
    vehicles: VehicleRepository,
    users: UserRepository,
}

impl ReservationController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            reservations: ReservationRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    /// Cotización sin efectos: mismo cálculo que usa la creación
    pub async fn quote(&self, request: QuoteRequest) -> Result<PriceBreakdown, AppError> {
        let auto = self
            .vehicles
            .find_by_id(request.auto_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        pricing_service::calculate_total(
            auto.precio_dia,
            &auto.tipo,
            request.fecha_inicio,
            request.fecha_fin,
        )
    }

    /// Consulta de solo lectura: reservas no canceladas del auto que
    /// solapan el rango candidato. No mira el flag `disponible`; ese
    /// solo aplica al momento de reservar.
    pub async fn availability(
        &self,
        request: QuoteRequest,
    ) -> Result<AvailabilityResponse, AppError> {
        pricing_service::rental_days(request.fecha_inicio, request.fecha_fin)?;

        self.vehicles
            .find_by_id(request.auto_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let conflictos = self
            .reservations
            .find_conflicts(request.auto_id, request.fecha_inicio, request.fecha_fin)
            .await?;

        Ok(AvailabilityResponse {
            auto_id: request.auto_id,
            fecha_inicio: request.fecha_inicio,
            fecha_fin: request.fecha_fin,
            disponible: conflictos.is_empty(),
            conflictos,
        })
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateReservationRequest,
    ) -> Result<ApiResponse<Reservation>, AppError> {
        let estado_inicial = match request.estado.as_deref() {
            None => ReservationStatus::Pendiente,
            Some(valor) => match ReservationStatus::parse(valor) {
                Some(ReservationStatus::Pendiente) => ReservationStatus::Pendiente,
                Some(ReservationStatus::Confirmada) => ReservationStatus::Confirmada,
                _ => {
                    return Err(AppError::BadRequest(
                        "Estado inicial inválido: debe ser Pendiente o Confirmada".to_string(),
                    ))
                }
            },
        };

        // El precio se calcula del lado del servidor, nunca del request
        let auto = self
            .vehicles
            .find_by_id(request.auto_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let desglose = pricing_service::calculate_total(
            auto.precio_dia,
            &auto.tipo,
            request.fecha_inicio,
            request.fecha_fin,
        )?;

        let reserva = self
            .reservations
            .create_booking(
                actor.id,
                request.auto_id,
                request.fecha_inicio,
                request.fecha_fin,
                desglose.total,
                estado_inicial,
                request.metodo_pago,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            reserva,
            "Reserva creada exitosamente".to_string(),
        ))
    }

    pub async fn list(&self, actor: &AuthenticatedUser) -> Result<Vec<Reservation>, AppError> {
        if actor.is_admin() {
            self.reservations.find_all().await
        } else {
            self.reservations.find_by_user(actor.id).await
        }
    }

    pub async fn get_by_id(
        &self,
        id: i64,
        actor: &AuthenticatedUser,
    ) -> Result<Reservation, AppError> {
        let reserva = self
            .reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reserva no encontrada".to_string()))?;

        if reserva.usuario_id != actor.id && !actor.is_admin() {
            return Err(AppError::Forbidden(
                "No tienes permiso para ver esta reserva".to_string(),
            ));
        }

        Ok(reserva)
    }

    /// Cancelación: dos escritos independientes. El cambio de estado es
    /// el autoritativo; restaurar el flag del auto es best-effort.
    pub async fn cancel(
        &self,
        id: i64,
        actor: &AuthenticatedUser,
    ) -> Result<ApiResponse<Reservation>, AppError> {
        let reserva = self.get_by_id(id, actor).await?;

        match reserva.status() {
            Some(ReservationStatus::Cancelada) => {
                return Err(AppError::Conflict("La reserva ya está cancelada".to_string()))
            }
            Some(ReservationStatus::Completada) => {
                return Err(AppError::Conflict(
                    "No se puede cancelar una reserva completada".to_string(),
                ))
            }
            _ => {}
        }

        let reserva = self
            .reservations
            .update_estado(id, ReservationStatus::Cancelada)
            .await?;

        if let Err(e) = self.vehicles.set_disponible(reserva.auto_id, true).await {
            tracing::warn!(
                "Reserva {} cancelada pero no se pudo liberar el auto {}: {}",
                id,
                reserva.auto_id,
                e
            );
        }

        Ok(ApiResponse::success_with_message(
            reserva,
            "Reserva cancelada exitosamente".to_string(),
        ))
    }

    pub async fn invoice(
        &self,
        id: i64,
        actor: &AuthenticatedUser,
    ) -> Result<InvoiceResponse, AppError> {
        let reserva = self.get_by_id(id, actor).await?;

        let auto = self
            .vehicles
            .find_by_id(reserva.auto_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))?;

        let cliente = self
            .users
            .find_by_id(reserva.usuario_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))?;

        invoice_service::build_invoice(&reserva, &auto, &cliente)
    }
}
