//! Modelo de Reservation
//!
//! Mapea exactamente a la tabla `reservas`. El rango de fechas es
//! inmutable una vez creada la reserva; solo el estado transiciona.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Estados posibles de una reserva
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    Pendiente,
    Confirmada,
    Cancelada,
    Completada,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pendiente => "Pendiente",
            ReservationStatus::Confirmada => "Confirmada",
            ReservationStatus::Cancelada => "Cancelada",
            ReservationStatus::Completada => "Completada",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Pendiente" => Some(ReservationStatus::Pendiente),
            "Confirmada" => Some(ReservationStatus::Confirmada),
            "Cancelada" => Some(ReservationStatus::Cancelada),
            "Completada" => Some(ReservationStatus::Completada),
            _ => None,
        }
    }
}

/// Metadata opcional del método de pago, almacenada como JSONB
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub metodo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marca_tarjeta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ultimos_digitos: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titular: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documento_identidad: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub licencia: Option<String>,
}

/// Reservation - mapea exactamente a la tabla reservas
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Reservation {
    pub id: i64,
    pub usuario_id: i64,
    pub auto_id: i64,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub precio_total: Decimal,
    pub estado: String,
    pub metodo_pago: Option<sqlx::types::Json<PaymentMethod>>,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    pub fn status(&self) -> Option<ReservationStatus> {
        ReservationStatus::parse(&self.estado)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for estado in ["Pendiente", "Confirmada", "Cancelada", "Completada"] {
            assert_eq!(ReservationStatus::parse(estado).unwrap().as_str(), estado);
        }
        assert!(ReservationStatus::parse("Desconocido").is_none());
    }
}
