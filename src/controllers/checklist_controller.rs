//! Controller de checklists de condición
//!
//! El registro por defecto se materializa en el primer acceso. Para un
//! auto desconocido la lectura devuelve un registro transitorio (no
//! persistido) con una advertencia, para no bloquear al caller.

use chrono::Utc;
use sqlx::PgPool;
use validator::Validate;

use crate::dto::common::ApiResponse;
use crate::models::checklist::{
    AddDamageRequest, Checklist, ChecklistResponse, DamageAnnotation, UpdateChecklistRequest,
};
use crate::repositories::checklist_repository::ChecklistRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_not_empty;

pub struct ChecklistController {
    checklists: ChecklistRepository,
    vehicles: VehicleRepository,
}

impl ChecklistController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            checklists: ChecklistRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    /// Materializar el checklist si el auto existe; NotFound si no.
    async fn ensure_persisted(&self, vehiculo_id: i64) -> Result<Checklist, AppError> {
        if let Some(checklist) = self.checklists.find_by_vehicle(vehiculo_id).await? {
            return Ok(checklist);
        }

        if self.vehicles.find_by_id(vehiculo_id).await?.is_none() {
            return Err(AppError::NotFound("Vehículo no encontrado".to_string()));
        }

        self.checklists.create_default(vehiculo_id).await
    }

    pub async fn get(&self, vehiculo_id: i64) -> Result<ChecklistResponse, AppError> {
        if let Some(checklist) = self.checklists.find_by_vehicle(vehiculo_id).await? {
            return Ok(ChecklistResponse::from(checklist));
        }

        if self.vehicles.find_by_id(vehiculo_id).await?.is_some() {
            let checklist = self.checklists.create_default(vehiculo_id).await?;
            return Ok(ChecklistResponse::from(checklist));
        }

        // Auto desconocido: registro transitorio, no persistido
        Ok(ChecklistResponse {
            checklist: Checklist::default_for(vehiculo_id),
            advertencia: Some(
                "El checklist no está vinculado a un vehículo existente".to_string(),
            ),
        })
    }

    pub async fn list(&self) -> Result<Vec<Checklist>, AppError> {
        self.checklists.find_all().await
    }

    pub async fn update(
        &self,
        vehiculo_id: i64,
        request: UpdateChecklistRequest,
    ) -> Result<ApiResponse<Checklist>, AppError> {
        request.validate()?;

        self.ensure_persisted(vehiculo_id).await?;

        let checklist = self
            .checklists
            .update_fields(
                vehiculo_id,
                request.combustible_nivel,
                request.combustible_porcentaje,
                request.inventario,
                request.condicion_general,
                request.observaciones,
            )
            .await?;

        Ok(ApiResponse::success_with_message(
            checklist,
            "Checklist actualizado exitosamente".to_string(),
        ))
    }

    pub async fn add_damage(
        &self,
        vehiculo_id: i64,
        request: AddDamageRequest,
    ) -> Result<ApiResponse<Checklist>, AppError> {
        if validate_not_empty(&request.descripcion).is_err()
            || validate_not_empty(&request.ubicacion).is_err()
        {
            return Err(AppError::BadRequest(
                "La descripción y la ubicación del daño son requeridas".to_string(),
            ));
        }

        let checklist = self.ensure_persisted(vehiculo_id).await?;

        let mut danos = checklist.danos.0;
        let next_id = danos.iter().map(|d| d.id).max().unwrap_or(0) + 1;
        danos.push(DamageAnnotation {
            id: next_id,
            descripcion: request.descripcion.trim().to_string(),
            ubicacion: request.ubicacion.trim().to_string(),
            fecha: Utc::now(),
        });

        let checklist = self.checklists.save_danos(vehiculo_id, danos).await?;

        Ok(ApiResponse::success_with_message(
            checklist,
            "Daño registrado exitosamente".to_string(),
        ))
    }

    /// Quitar una anotación de daño. Checklist desconocido es 404; un id
    /// de daño inexistente es un no-op silencioso.
    pub async fn remove_damage(
        &self,
        vehiculo_id: i64,
        dano_id: i64,
    ) -> Result<ApiResponse<Checklist>, AppError> {
        let checklist = self
            .checklists
            .find_by_vehicle(vehiculo_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Checklist no encontrado".to_string()))?;

        let danos: Vec<DamageAnnotation> = checklist
            .danos
            .0
            .into_iter()
            .filter(|d| d.id != dano_id)
            .collect();

        let checklist = self.checklists.save_danos(vehiculo_id, danos).await?;

        Ok(ApiResponse::success_with_message(
            checklist,
            "Daño eliminado".to_string(),
        ))
    }

    pub async fn delete(&self, vehiculo_id: i64) -> Result<(), AppError> {
        self.checklists.delete(vehiculo_id).await
    }
}
