//! Controller del catálogo
//!
//! Camino de lectura de conveniencia sobre el agregado denormalizado,
//! con reconciliación self-healing contra la tabla de autos.

use sqlx::PgPool;

use crate::models::vehicle::{Vehicle, VehicleFilters};
use crate::repositories::catalog_repository::{merge_missing, CatalogRepository};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

pub struct CatalogController {
    catalog: CatalogRepository,
    vehicles: VehicleRepository,
}

impl CatalogController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            catalog: CatalogRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    /// Reconciliar el agregado con la tabla de autos. Idempotente:
    /// solo agrega ids faltantes, nunca quita.
    pub async fn reconcile(&self) -> Result<Vec<i64>, AppError> {
        let aggregate = self.catalog.load_or_create().await?;
        let autoritativos = self.vehicles.find_ids().await?;

        let (resultado, agregados) = merge_missing(&aggregate.auto_ids, &autoritativos);

        if agregados > 0 {
            tracing::info!("Catálogo reconciliado: {} autos agregados", agregados);
            self.catalog.save(&resultado).await?;
        }

        Ok(resultado)
    }

    /// Listado del catálogo. En modo degradado (fuente autoritativa
    /// inaccesible) devuelve lo último que el agregado contenía, sin
    /// fallar; el cliente cae a su cache local si hace falta.
    pub async fn list(&self) -> Result<Vec<Vehicle>, AppError> {
        let ids = match self.reconcile().await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!("Reconciliación de catálogo falló: {}", e);
                match self.catalog.load_or_create().await {
                    Ok(aggregate) => aggregate.auto_ids,
                    Err(e) => {
                        tracing::warn!("Agregado de catálogo inaccesible: {}", e);
                        return Ok(Vec::new());
                    }
                }
            }
        };

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        match self.vehicles.find_by_ids(&ids).await {
            Ok(vehicles) => Ok(vehicles),
            Err(e) => {
                tracing::warn!("Lectura de autos del catálogo falló: {}", e);
                Ok(Vec::new())
            }
        }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Vehicle, AppError> {
        self.vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Vehículo no encontrado".to_string()))
    }

    pub async fn search(&self, filters: VehicleFilters) -> Result<Vec<Vehicle>, AppError> {
        self.vehicles.search(&filters).await
    }
}
