//! Generación de facturas
//!
//! Construye el documento JSON de factura de una reserva. El total es
//! siempre el `precio_total` almacenado al crear la reserva; el desglose
//! se reconstruye a partir de él, de modo que un cambio posterior del
//! precio del auto no altera lo facturado.

use chrono::Utc;

use crate::dto::reservation_dto::{InvoiceParty, InvoiceResponse, InvoiceVehicle};
use crate::models::reservation::Reservation;
use crate::models::user::User;
use crate::models::vehicle::Vehicle;
use crate::services::pricing_service;
use crate::utils::errors::AppError;

/// Número de factura derivado del id de la reserva
pub fn invoice_number(reserva_id: i64) -> String {
    format!("FAC-{:06}", reserva_id)
}

pub fn build_invoice(
    reserva: &Reservation,
    auto: &Vehicle,
    cliente: &User,
) -> Result<InvoiceResponse, AppError> {
    let desglose = pricing_service::breakdown_from_total(
        reserva.precio_total,
        &auto.tipo,
        reserva.fecha_inicio,
        reserva.fecha_fin,
    )?;

    Ok(InvoiceResponse {
        numero: invoice_number(reserva.id),
        fecha_emision: Utc::now(),
        cliente: InvoiceParty {
            nombre: cliente.nombre.clone(),
            email: cliente.email.clone(),
            documento: cliente.numero_documento.clone(),
        },
        auto: InvoiceVehicle {
            marca: auto.marca.clone(),
            modelo: auto.modelo.clone(),
            anio: auto.anio,
            tipo: auto.tipo.clone(),
            placa: auto.placa.clone(),
        },
        fecha_inicio: reserva.fecha_inicio,
        fecha_fin: reserva.fecha_fin,
        estado: reserva.estado.clone(),
        desglose,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn fecha(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn cliente() -> User {
        User {
            id: 1,
            nombre: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: "hash".to_string(),
            rol: "cliente".to_string(),
            telefono: None,
            tipo_documento: None,
            numero_documento: None,
            created_at: Utc::now(),
        }
    }

    fn auto(precio_dia: Decimal) -> Vehicle {
        Vehicle {
            id: 1,
            marca: "Toyota".to_string(),
            modelo: "RAV4".to_string(),
            anio: 2022,
            tipo: "SUV".to_string(),
            color: None,
            placa: "ABC-001".to_string(),
            precio_dia,
            disponible: false,
            imagen: None,
            combustible: None,
            transmision: None,
            capacidad: Some(5),
            created_at: Utc::now(),
        }
    }

    fn reserva(precio_total: Decimal) -> Reservation {
        Reservation {
            id: 17,
            usuario_id: 1,
            auto_id: 1,
            fecha_inicio: fecha("2024-03-01"),
            fecha_fin: fecha("2024-03-08"),
            precio_total,
            estado: "Confirmada".to_string(),
            metodo_pago: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_invoice_number() {
        assert_eq!(invoice_number(17), "FAC-000017");
        assert_eq!(invoice_number(1234567), "FAC-1234567");
    }

    #[test]
    fn test_factura_usa_el_total_cobrado() {
        // Reserva cobrada a 100/día (892.50); el auto después subió a
        // 200/día. La factura mantiene lo cobrado.
        let factura = build_invoice(
            &reserva(Decimal::new(89250, 2)),
            &auto(Decimal::from(200)),
            &cliente(),
        )
        .unwrap();

        assert_eq!(factura.desglose.total, Decimal::new(89250, 2));
        assert_eq!(factura.desglose.precio_dia, Decimal::new(10000, 2));
        assert_eq!(factura.numero, "FAC-000017");
    }
}
