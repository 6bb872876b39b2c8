//! Verificación de disponibilidad por rango de fechas
//!
//! El predicado de solape es la fuente de verdad para consultas por
//! rango; la query SQL del repositorio de reservas replica exactamente
//! esta condición.

use chrono::NaiveDate;

use crate::models::reservation::{Reservation, ReservationStatus};

/// Condición estándar de solape de intervalos:
/// existente.inicio <= candidato.fin AND existente.fin >= candidato.inicio
pub fn ranges_overlap(
    existente_inicio: NaiveDate,
    existente_fin: NaiveDate,
    candidato_inicio: NaiveDate,
    candidato_fin: NaiveDate,
) -> bool {
    existente_inicio <= candidato_fin && existente_fin >= candidato_inicio
}

/// Una reserva bloquea un rango candidato si no está cancelada y solapa
pub fn blocks_range(reserva: &Reservation, inicio: NaiveDate, fin: NaiveDate) -> bool {
    reserva.status() != Some(ReservationStatus::Cancelada)
        && ranges_overlap(reserva.fecha_inicio, reserva.fecha_fin, inicio, fin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn fecha(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn reserva(inicio: &str, fin: &str, estado: &str) -> Reservation {
        Reservation {
            id: 1,
            usuario_id: 1,
            auto_id: 1,
            fecha_inicio: fecha(inicio),
            fecha_fin: fecha(fin),
            precio_total: Decimal::from(100),
            estado: estado.to_string(),
            metodo_pago: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_overlap_parcial() {
        // Reserva 10–15 de marzo vs candidato 12–20: solapan
        assert!(ranges_overlap(
            fecha("2024-03-10"),
            fecha("2024-03-15"),
            fecha("2024-03-12"),
            fecha("2024-03-20"),
        ));
    }

    #[test]
    fn test_sin_overlap() {
        assert!(!ranges_overlap(
            fecha("2024-03-10"),
            fecha("2024-03-15"),
            fecha("2024-03-16"),
            fecha("2024-03-20"),
        ));
    }

    #[test]
    fn test_overlap_en_el_borde() {
        // Los extremos compartidos cuentan como conflicto
        assert!(ranges_overlap(
            fecha("2024-03-10"),
            fecha("2024-03-15"),
            fecha("2024-03-15"),
            fecha("2024-03-20"),
        ));
    }

    #[test]
    fn test_reserva_activa_bloquea() {
        let r = reserva("2024-03-10", "2024-03-15", "Pendiente");
        assert!(blocks_range(&r, fecha("2024-03-12"), fecha("2024-03-20")));
    }

    #[test]
    fn test_reserva_cancelada_no_bloquea() {
        let r = reserva("2024-03-10", "2024-03-15", "Cancelada");
        assert!(!blocks_range(&r, fecha("2024-03-12"), fecha("2024-03-20")));
    }
}
