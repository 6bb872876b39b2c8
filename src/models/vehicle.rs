//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y sus variantes para CRUD operations.
//! Mapea exactamente a la tabla `autos` del schema PostgreSQL.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Vehicle principal - mapea exactamente a la tabla autos
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub marca: String,
    pub modelo: String,
    pub anio: i32,
    pub tipo: String,
    pub color: Option<String>,
    pub placa: String,
    pub precio_dia: Decimal,
    pub disponible: bool,
    pub imagen: Option<String>,
    pub combustible: Option<String>,
    pub transmision: Option<String>,
    pub capacidad: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Request para crear un nuevo vehículo.
///
/// Los alias serde aceptan las grafías legacy del cliente histórico
/// (`año`, `tipoCoche`, `precioDia`/`precioBase`); el modelo persiste
/// un único campo canónico por concepto.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 2, max = 100))]
    pub marca: String,

    #[validate(length(min = 1, max = 100))]
    pub modelo: String,

    #[validate(range(min = 1900, max = 2030))]
    #[serde(alias = "año")]
    pub anio: i32,

    #[validate(length(min = 2, max = 50))]
    #[serde(alias = "tipoCoche")]
    pub tipo: String,

    #[validate(length(min = 2, max = 50))]
    pub color: Option<String>,

    #[validate(length(min = 5, max = 20))]
    pub placa: String,

    #[serde(alias = "precioDia", alias = "precioBase")]
    pub precio_dia: Decimal,

    pub imagen: Option<String>,
    pub combustible: Option<String>,
    pub transmision: Option<String>,

    #[validate(range(min = 1, max = 20))]
    pub capacidad: Option<i32>,
}

/// Request para actualizar un vehículo existente
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 2, max = 100))]
    pub marca: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub modelo: Option<String>,

    #[validate(range(min = 1900, max = 2030))]
    #[serde(alias = "año")]
    pub anio: Option<i32>,

    #[validate(length(min = 2, max = 50))]
    #[serde(alias = "tipoCoche")]
    pub tipo: Option<String>,

    #[validate(length(min = 2, max = 50))]
    pub color: Option<String>,

    #[validate(length(min = 5, max = 20))]
    pub placa: Option<String>,

    #[serde(alias = "precioDia", alias = "precioBase")]
    pub precio_dia: Option<Decimal>,

    pub disponible: Option<bool>,
    pub imagen: Option<String>,
    pub combustible: Option<String>,
    pub transmision: Option<String>,

    #[validate(range(min = 1, max = 20))]
    pub capacidad: Option<i32>,
}

/// Filtros para búsqueda de vehículos
#[derive(Debug, Default, Deserialize)]
pub struct VehicleFilters {
    pub marca: Option<String>,
    #[serde(alias = "tipoCoche")]
    pub tipo: Option<String>,
    pub precio_min: Option<Decimal>,
    pub precio_max: Option<Decimal>,
    pub combustible: Option<String>,
    pub transmision: Option<String>,
    pub capacidad: Option<i32>,
    pub disponible: Option<bool>,
}
