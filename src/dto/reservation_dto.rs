use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::reservation::{PaymentMethod, Reservation};
use crate::services::pricing_service::PriceBreakdown;

/// Request para crear una reserva
#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    #[serde(alias = "autoId")]
    pub auto_id: i64,
    #[serde(alias = "fechaInicio")]
    pub fecha_inicio: NaiveDate,
    #[serde(alias = "fechaFin")]
    pub fecha_fin: NaiveDate,
    /// Estado inicial opcional (Pendiente o Confirmada)
    pub estado: Option<String>,
    #[serde(alias = "metodoPago")]
    pub metodo_pago: Option<PaymentMethod>,
}

/// Request para cotizar el precio de una reserva sin crearla
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(alias = "autoId")]
    pub auto_id: i64,
    #[serde(alias = "fechaInicio")]
    pub fecha_inicio: NaiveDate,
    #[serde(alias = "fechaFin")]
    pub fecha_fin: NaiveDate,
}

/// Respuesta de la consulta de disponibilidad por rango de fechas
#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub auto_id: i64,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub disponible: bool,
    pub conflictos: Vec<Reservation>,
}

/// Línea de factura de una reserva
#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub numero: String,
    pub fecha_emision: chrono::DateTime<chrono::Utc>,
    pub cliente: InvoiceParty,
    pub auto: InvoiceVehicle,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: NaiveDate,
    pub estado: String,
    pub desglose: PriceBreakdown,
}

#[derive(Debug, Serialize)]
pub struct InvoiceParty {
    pub nombre: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documento: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InvoiceVehicle {
    pub marca: String,
    pub modelo: String,
    pub anio: i32,
    pub tipo: String,
    pub placa: String,
}
