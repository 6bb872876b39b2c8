//! Modelo de Checklist de condición del vehículo
//!
//! Un registro por auto (keyed por `vehiculo_id`), con nivel de
//! combustible, anotaciones de daños e inventario. El registro por
//! defecto se materializa en el primer acceso.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// Anotación de daño sobre el vehículo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageAnnotation {
    pub id: i64,
    pub descripcion: String,
    pub ubicacion: String,
    pub fecha: DateTime<Utc>,
}

/// Ítem del inventario del vehículo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub nombre: String,
    pub presente: bool,
    pub condicion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nota: Option<String>,
}

impl InventoryItem {
    fn nuevo(nombre: &str) -> Self {
        Self {
            nombre: nombre.to_string(),
            presente: true,
            condicion: "Bueno".to_string(),
            nota: None,
        }
    }

    /// Inventario por defecto: 8 ítems de seguridad y utilidad,
    /// todos presentes y en buen estado.
    pub fn default_set() -> Vec<InventoryItem> {
        [
            "Llanta de refacción",
            "Gato hidráulico",
            "Llave de cruz",
            "Triángulos de seguridad",
            "Extintor",
            "Botiquín de primeros auxilios",
            "Cables pasacorriente",
            "Chaleco reflectante",
        ]
        .iter()
        .map(|nombre| InventoryItem::nuevo(nombre))
        .collect()
    }
}

/// Checklist - mapea exactamente a la tabla checklists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Checklist {
    pub vehiculo_id: i64,
    pub combustible_nivel: String,
    pub combustible_porcentaje: i32,
    pub danos: Json<Vec<DamageAnnotation>>,
    pub inventario: Json<Vec<InventoryItem>>,
    pub condicion_general: String,
    pub observaciones: String,
    pub ultima_revision: DateTime<Utc>,
}

impl Checklist {
    /// Registro por defecto para un auto sin checklist
    pub fn default_for(vehiculo_id: i64) -> Self {
        Self {
            vehiculo_id,
            combustible_nivel: "Lleno".to_string(),
            combustible_porcentaje: 100,
            danos: Json(Vec::new()),
            inventario: Json(InventoryItem::default_set()),
            condicion_general: "Bueno".to_string(),
            observaciones: String::new(),
            ultima_revision: Utc::now(),
        }
    }
}

/// Request de actualización parcial del checklist
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateChecklistRequest {
    #[validate(length(min = 1, max = 50))]
    pub combustible_nivel: Option<String>,

    #[validate(range(min = 0, max = 100))]
    pub combustible_porcentaje: Option<i32>,

    pub inventario: Option<Vec<InventoryItem>>,

    #[validate(length(min = 1, max = 50))]
    pub condicion_general: Option<String>,

    pub observaciones: Option<String>,
}

/// Request para agregar una anotación de daño
#[derive(Debug, Deserialize)]
pub struct AddDamageRequest {
    pub descripcion: String,
    pub ubicacion: String,
}

/// Response de checklist; `advertencia` se usa cuando el registro es
/// transitorio porque el auto no existe en el catálogo todavía.
#[derive(Debug, Serialize)]
pub struct ChecklistResponse {
    #[serde(flatten)]
    pub checklist: Checklist,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertencia: Option<String>,
}

impl From<Checklist> for ChecklistResponse {
    fn from(checklist: Checklist) -> Self {
        Self {
            checklist,
            advertencia: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_checklist() {
        let checklist = Checklist::default_for(7);

        assert_eq!(checklist.vehiculo_id, 7);
        assert_eq!(checklist.combustible_nivel, "Lleno");
        assert_eq!(checklist.combustible_porcentaje, 100);
        assert!(checklist.danos.0.is_empty());
        assert_eq!(checklist.condicion_general, "Bueno");

        let inventario = &checklist.inventario.0;
        assert_eq!(inventario.len(), 8);
        assert!(inventario.iter().all(|item| item.presente));
        assert!(inventario.iter().all(|item| item.condicion == "Bueno"));
    }
}
