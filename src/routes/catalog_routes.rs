use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::catalog_controller::CatalogController;
use crate::dto::common::ApiResponse;
use crate::models::vehicle::{Vehicle, VehicleFilters};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Espejo de solo lectura del catálogo de autos
pub fn create_catalog_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_catalog))
        .route("/search", get(search_catalog))
        .route("/:id", get(get_catalog_vehicle))
}

async fn list_catalog(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Vehicle>>>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    let vehicles = controller.list().await?;
    Ok(Json(ApiResponse::success(vehicles)))
}

async fn search_catalog(
    State(state): State<AppState>,
    Query(filters): Query<VehicleFilters>,
) -> Result<Json<ApiResponse<Vec<Vehicle>>>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    let vehicles = controller.search(filters).await?;
    Ok(Json(ApiResponse::success(vehicles)))
}

async fn get_catalog_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    let vehicle = controller.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(vehicle)))
}
