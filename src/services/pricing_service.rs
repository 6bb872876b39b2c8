//! Cálculo de precios de reserva
//!
//! Funciones puras: duración en días, descuento por duración,
//! multiplicador por categoría de vehículo y total redondeado a centavos.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::utils::errors::AppError;

/// Desglose del precio de una reserva
#[derive(Debug, Clone, Serialize)]
pub struct PriceBreakdown {
    pub dias: i64,
    pub precio_dia: Decimal,
    pub subtotal: Decimal,
    pub descuento_porcentaje: u32,
    pub subtotal_con_descuento: Decimal,
    pub multiplicador: Decimal,
    pub total: Decimal,
}

/// Duración de la reserva en días completos.
///
/// Un rango invertido o vacío se rechaza; no se normaliza en silencio.
pub fn rental_days(inicio: NaiveDate, fin: NaiveDate) -> Result<i64, AppError> {
    let dias = (fin - inicio).num_days();
    if dias <= 0 {
        return Err(AppError::BadRequest(
            "Rango de fechas inválido: la fecha de fin debe ser posterior a la de inicio".to_string(),
        ));
    }
    Ok(dias)
}

/// Porcentaje de descuento por duración, del tramo más largo al más corto
pub fn discount_percent(dias: i64) -> u32 {
    if dias >= 30 {
        30
    } else if dias >= 7 {
        15
    } else if dias >= 3 {
        5
    } else {
        0
    }
}

fn normalize_category(tipo: &str) -> String {
    tipo.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' => 'u',
            other => other,
        })
        .collect()
}

/// Multiplicador por categoría de vehículo.
///
/// Acepta las etiquetas en español del catálogo y sus equivalentes en
/// inglés; cualquier categoría desconocida vale 1.0.
pub fn category_multiplier(tipo: &str) -> Decimal {
    match normalize_category(tipo).as_str() {
        "compacto" | "compact" => Decimal::new(10, 1),
        "sedan" => Decimal::new(12, 1),
        "suv" => Decimal::new(15, 1),
        "deportivo" | "sports" => Decimal::new(18, 1),
        "pickup" | "camioneta" | "truck" => Decimal::new(16, 1),
        "lujo" | "luxury" => Decimal::new(20, 1),
        _ => Decimal::new(10, 1),
    }
}

/// Calcular el precio total de una reserva.
///
/// total = round(precio_dia × dias × (1 − desc/100) × multiplicador, 2),
/// redondeo half-up a centavos.
pub fn calculate_total(
    precio_dia: Decimal,
    tipo: &str,
    inicio: NaiveDate,
    fin: NaiveDate,
) -> Result<PriceBreakdown, AppError> {
    let dias = rental_days(inicio, fin)?;
    let descuento = discount_percent(dias);

    let subtotal = precio_dia * Decimal::from(dias);
    let factor = (Decimal::from(100u32 - descuento)) / Decimal::from(100);
    let subtotal_con_descuento = subtotal * factor;

    let multiplicador = category_multiplier(tipo);
    let total = (subtotal_con_descuento * multiplicador)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Ok(PriceBreakdown {
        dias,
        precio_dia,
        subtotal,
        descuento_porcentaje: descuento,
        subtotal_con_descuento,
        multiplicador,
        total,
    })
}

/// Reconstruir el desglose a partir de un total ya cobrado.
///
/// La factura presenta lo que se cobró al crear la reserva, no el
/// precio vigente del auto: el precio por día se deriva del total
/// invirtiendo el cálculo, con el descuento dado por la duración.
pub fn breakdown_from_total(
    total: Decimal,
    tipo: &str,
    inicio: NaiveDate,
    fin: NaiveDate,
) -> Result<PriceBreakdown, AppError> {
    let dias = rental_days(inicio, fin)?;
    let descuento = discount_percent(dias);
    let multiplicador = category_multiplier(tipo);
    let factor = Decimal::from(100u32 - descuento) / Decimal::from(100);

    let subtotal_con_descuento = (total / multiplicador)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let subtotal = (subtotal_con_descuento / factor)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let precio_dia = (subtotal / Decimal::from(dias))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Ok(PriceBreakdown {
        dias,
        precio_dia,
        subtotal,
        descuento_porcentaje: descuento,
        subtotal_con_descuento,
        multiplicador,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fecha(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_rental_days() {
        assert_eq!(rental_days(fecha("2024-03-01"), fecha("2024-03-08")).unwrap(), 7);
        assert_eq!(rental_days(fecha("2024-03-01"), fecha("2024-03-02")).unwrap(), 1);
    }

    #[test]
    fn test_rental_days_invalid_range() {
        // Rango vacío e invertido se rechazan
        assert!(rental_days(fecha("2024-03-01"), fecha("2024-03-01")).is_err());
        assert!(rental_days(fecha("2024-03-08"), fecha("2024-03-01")).is_err());
    }

    #[test]
    fn test_discount_tiers() {
        assert_eq!(discount_percent(1), 0);
        assert_eq!(discount_percent(2), 0);
        assert_eq!(discount_percent(3), 5);
        assert_eq!(discount_percent(6), 5);
        assert_eq!(discount_percent(7), 15);
        assert_eq!(discount_percent(29), 15);
        assert_eq!(discount_percent(30), 30);
        assert_eq!(discount_percent(365), 30);
    }

    #[test]
    fn test_category_multipliers() {
        assert_eq!(category_multiplier("Compacto"), Decimal::new(10, 1));
        assert_eq!(category_multiplier("Sedán"), Decimal::new(12, 1));
        assert_eq!(category_multiplier("SUV"), Decimal::new(15, 1));
        assert_eq!(category_multiplier("Deportivo"), Decimal::new(18, 1));
        assert_eq!(category_multiplier("Pickup"), Decimal::new(16, 1));
        assert_eq!(category_multiplier("Camioneta"), Decimal::new(16, 1));
        assert_eq!(category_multiplier("Lujo"), Decimal::new(20, 1));
        // Categoría desconocida no recarga
        assert_eq!(category_multiplier("Furgoneta"), Decimal::new(10, 1));
    }

    #[test]
    fn test_calculate_total_suv_una_semana() {
        // 100/día × 7 días = 700; 15% desc = 595; ×1.5 = 892.50
        let breakdown = calculate_total(
            Decimal::from(100),
            "SUV",
            fecha("2024-03-01"),
            fecha("2024-03-08"),
        )
        .unwrap();

        assert_eq!(breakdown.dias, 7);
        assert_eq!(breakdown.descuento_porcentaje, 15);
        assert_eq!(breakdown.subtotal, Decimal::from(700));
        assert_eq!(breakdown.subtotal_con_descuento, Decimal::from(595));
        assert_eq!(breakdown.total, Decimal::new(89250, 2));
    }

    #[test]
    fn test_calculate_total_sin_descuento() {
        // 2 días de compacto: sin descuento ni recargo
        let breakdown = calculate_total(
            Decimal::new(5050, 2),
            "Compacto",
            fecha("2024-05-10"),
            fecha("2024-05-12"),
        )
        .unwrap();

        assert_eq!(breakdown.dias, 2);
        assert_eq!(breakdown.descuento_porcentaje, 0);
        assert_eq!(breakdown.total, Decimal::new(10100, 2));
    }

    #[test]
    fn test_calculate_total_mes_de_lujo() {
        // 30 días × 200 = 6000; 30% desc = 4200; ×2.0 = 8400.00
        let breakdown = calculate_total(
            Decimal::from(200),
            "Lujo",
            fecha("2024-01-01"),
            fecha("2024-01-31"),
        )
        .unwrap();

        assert_eq!(breakdown.dias, 30);
        assert_eq!(breakdown.descuento_porcentaje, 30);
        assert_eq!(breakdown.total, Decimal::new(840000, 2));
    }

    #[test]
    fn test_breakdown_from_total_invierte_el_calculo() {
        // 892.50 de SUV por una semana: /1.5 = 595, /0.85 = 700, /7 = 100
        let breakdown = breakdown_from_total(
            Decimal::new(89250, 2),
            "SUV",
            fecha("2024-03-01"),
            fecha("2024-03-08"),
        )
        .unwrap();

        assert_eq!(breakdown.total, Decimal::new(89250, 2));
        assert_eq!(breakdown.precio_dia, Decimal::new(10000, 2));
        assert_eq!(breakdown.subtotal, Decimal::new(70000, 2));
        assert_eq!(breakdown.subtotal_con_descuento, Decimal::new(59500, 2));
        assert_eq!(breakdown.descuento_porcentaje, 15);
    }

    #[test]
    fn test_calculate_total_redondeo_half_up() {
        // 3 días × 33.33 = 99.99; 5% desc = 94.9905; ×1.2 = 113.9886 → 113.99
        let breakdown = calculate_total(
            Decimal::new(3333, 2),
            "Sedan",
            fecha("2024-07-01"),
            fecha("2024-07-04"),
        )
        .unwrap();

        assert_eq!(breakdown.total, Decimal::new(11399, 2));
    }
}
