//! Modelo del agregado de catálogo
//!
//! Una sola fila denormalizada con la lista ordenada de ids de autos.
//! No es autoritativo: siempre se puede reconstruir desde la tabla autos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Catálogo - mapea a la única fila de la tabla catalogo
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Catalog {
    pub id: i32,
    pub auto_ids: Vec<i64>,
    pub updated_at: DateTime<Utc>,
}
