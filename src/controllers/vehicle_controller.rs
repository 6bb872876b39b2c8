//! Controller de vehículos
//!
//! CRUD y búsqueda filtrada. El alta agrega el id al agregado de
//! catálogo; un fallo en ese paso se registra y no es fatal.

use sqlx::PgPool;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::models::vehicle::{CreateVehicleRequest, UpdateVehicleRequest, Vehicle, VehicleFilters};
use crate::repositories::catalog_repository::CatalogRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::{conflict_error, not_found_error, AppError};
use crate::utils::validation::validate_not_empty;

pub struct VehicleController {
    repository: VehicleRepository,
    catalog: CatalogRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            catalog: CatalogRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        request.validate()?;

        if validate_not_empty(&request.placa).is_err() {
            return Err(AppError::BadRequest("La placa es requerida".to_string()));
        }

        if self.repository.placa_exists(&request.placa, None).await? {
            return Err(conflict_error("Vehículo", "placa", &request.placa));
        }

        let vehicle = self.repository.create(request).await?;

        // El vehículo ya está persistido: un fallo del agregado no se
        // propaga al caller, la reconciliación lo repara después
        if let Err(e) = self.catalog.append_id(vehicle.id).await {
            tracing::warn!(
                "No se pudo agregar el auto {} al catálogo: {}",
                vehicle.id,
                e
            );
        }

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Vehicle, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehículo", id))
    }

    pub async fn list(&self) -> Result<Vec<Vehicle>, AppError> {
        self.repository.find_all().await
    }

    pub async fn search(&self, filters: VehicleFilters) -> Result<Vec<Vehicle>, AppError> {
        self.repository.search(&filters).await
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateVehicleRequest,
    ) -> Result<ApiResponse<Vehicle>, AppError> {
        request.validate()?;

        if let Some(ref placa) = request.placa {
            if self.repository.placa_exists(placa, Some(id)).await? {
                return Err(conflict_error("Vehículo", "placa", placa));
            }
        }

        let vehicle = self.repository.update(id, request).await?;

        Ok(ApiResponse::success_with_message(
            vehicle,
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.repository.delete(id).await
    }
}
