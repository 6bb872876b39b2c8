//! Tests de la transacción de reserva contra Postgres
//!
//! Requieren una base de datos accesible vía DATABASE_URL; se corren con
//! `cargo test -- --ignored`. Cada test recibe una base limpia con las
//! migraciones aplicadas.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use car_rental::models::reservation::ReservationStatus;
use car_rental::repositories::reservation_repository::ReservationRepository;
use car_rental::utils::errors::AppError;

fn fecha(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

async fn seed(pool: &PgPool) {
    sqlx::query(
        "INSERT INTO usuarios (id, nombre, email, password_hash, rol)
         VALUES (1, 'Ana', 'ana@example.com', 'hash', 'cliente')",
    )
    .execute(pool)
    .await
    .unwrap();

    sqlx::query(
        "INSERT INTO autos (id, marca, modelo, anio, tipo, placa, precio_dia, disponible)
         VALUES (1, 'Toyota', 'RAV4', 2022, 'SUV', 'ABC-001', 100.00, TRUE)",
    )
    .execute(pool)
    .await
    .unwrap();
}

async fn contar_reservas(pool: &PgPool) -> i64 {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reservas")
        .fetch_one(pool)
        .await
        .unwrap();
    n
}

async fn auto_disponible(pool: &PgPool) -> bool {
    let (d,): (bool,) = sqlx::query_as("SELECT disponible FROM autos WHERE id = 1")
        .fetch_one(pool)
        .await
        .unwrap();
    d
}

#[sqlx::test]
#[ignore]
async fn fallo_dentro_de_la_transaccion_no_deja_escritura_parcial(pool: PgPool) {
    seed(&pool).await;
    let repo = ReservationRepository::new(pool.clone());

    // El usuario 999 no existe: el lock y los chequeos pasan, el insert
    // falla por FK y la transacción entera se revierte
    let resultado = repo
        .create_booking(
            999,
            1,
            fecha("2024-03-01"),
            fecha("2024-03-08"),
            Decimal::new(89250, 2),
            ReservationStatus::Pendiente,
            None,
        )
        .await;

    assert!(resultado.is_err());
    assert_eq!(contar_reservas(&pool).await, 0);
    assert!(auto_disponible(&pool).await);
}

#[sqlx::test]
#[ignore]
async fn segunda_reserva_sobre_el_mismo_auto_es_conflicto(pool: PgPool) {
    seed(&pool).await;
    let repo = ReservationRepository::new(pool.clone());

    repo.create_booking(
        1,
        1,
        fecha("2024-03-01"),
        fecha("2024-03-08"),
        Decimal::new(89250, 2),
        ReservationStatus::Pendiente,
        None,
    )
    .await
    .unwrap();

    assert!(!auto_disponible(&pool).await);

    let segunda = repo
        .create_booking(
            1,
            1,
            fecha("2024-04-01"),
            fecha("2024-04-05"),
            Decimal::from(400),
            ReservationStatus::Pendiente,
            None,
        )
        .await;

    assert!(matches!(segunda, Err(AppError::Conflict(_))));
    assert_eq!(contar_reservas(&pool).await, 1);
}

#[sqlx::test]
#[ignore]
async fn reservas_concurrentes_solo_una_gana(pool: PgPool) {
    seed(&pool).await;
    let repo_a = ReservationRepository::new(pool.clone());
    let repo_b = ReservationRepository::new(pool.clone());

    // Dos intentos simultáneos sobre el mismo auto: el lock de fila los
    // serializa y el segundo ve el flag ya apagado
    let (a, b) = tokio::join!(
        repo_a.create_booking(
            1,
            1,
            fecha("2024-03-01"),
            fecha("2024-03-08"),
            Decimal::new(89250, 2),
            ReservationStatus::Pendiente,
            None,
        ),
        repo_b.create_booking(
            1,
            1,
            fecha("2024-03-01"),
            fecha("2024-03-08"),
            Decimal::new(89250, 2),
            ReservationStatus::Pendiente,
            None,
        ),
    );

    let exitos = a.is_ok() as u8 + b.is_ok() as u8;
    assert_eq!(exitos, 1);

    let perdedor = if a.is_ok() { b } else { a };
    assert!(matches!(perdedor, Err(AppError::Conflict(_))));

    assert_eq!(contar_reservas(&pool).await, 1);
    assert!(!auto_disponible(&pool).await);
}
