//! Tests de las reglas de pricing de reservas

use chrono::NaiveDate;
use rust_decimal::Decimal;

use car_rental::services::pricing_service::{calculate_total, discount_percent, rental_days};

fn fecha(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn descuento_por_tramo_de_duracion() {
    // Bordes de cada tramo, del más largo al más corto
    for (dias, esperado) in [
        (1, 0),
        (2, 0),
        (3, 5),
        (6, 5),
        (7, 15),
        (29, 15),
        (30, 30),
        (90, 30),
    ] {
        assert_eq!(discount_percent(dias), esperado, "para {} días", dias);
    }
}

#[test]
fn total_por_categoria() {
    // 2 días a 100/día, sin descuento: solo juega el multiplicador
    let inicio = fecha("2024-06-01");
    let fin = fecha("2024-06-03");

    for (tipo, esperado) in [
        ("Compacto", Decimal::new(20000, 2)),
        ("Sedan", Decimal::new(24000, 2)),
        ("SUV", Decimal::new(30000, 2)),
        ("Deportivo", Decimal::new(36000, 2)),
        ("Pickup", Decimal::new(32000, 2)),
        ("Lujo", Decimal::new(40000, 2)),
        ("Otro", Decimal::new(20000, 2)),
    ] {
        let breakdown = calculate_total(Decimal::from(100), tipo, inicio, fin).unwrap();
        assert_eq!(breakdown.total, esperado, "para categoría {}", tipo);
    }
}

#[test]
fn cotizacion_de_ejemplo_suv_una_semana() {
    // 100/día, SUV, 2024-03-01 → 2024-03-08: 7 días, 15% de descuento,
    // base 700, con descuento 595, ×1.5 = 892.50
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
    assert_eq!(breakdown.multiplicador, Decimal::new(15, 1));
    assert_eq!(breakdown.total, Decimal::new(89250, 2));
}

#[test]
fn rangos_invalidos_se_rechazan() {
    assert!(rental_days(fecha("2024-03-08"), fecha("2024-03-01")).is_err());
    assert!(rental_days(fecha("2024-03-01"), fecha("2024-03-01")).is_err());
    assert!(calculate_total(
        Decimal::from(100),
        "SUV",
        fecha("2024-03-08"),
        fecha("2024-03-01"),
    )
    .is_err());
}
