use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::controllers::checklist_controller::ChecklistController;
use crate::dto::common::ApiResponse;
use crate::middleware::auth::{admin_only_middleware, auth_middleware};
use crate::models::checklist::{
    AddDamageRequest, Checklist, ChecklistResponse, UpdateChecklistRequest,
};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_checklist_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/:vehiculo_id", get(get_checklist))
        .route("/:vehiculo_id", put(update_checklist))
        .route("/:vehiculo_id/danos", post(add_damage))
        .route("/:vehiculo_id/danos/:dano_id", delete(remove_damage))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let admin = Router::new()
        .route("/", get(list_checklists))
        .route("/:vehiculo_id", delete(delete_checklist))
        .route_layer(middleware::from_fn(admin_only_middleware))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware));

    protected.merge(admin)
}

async fn get_checklist(
    State(state): State<AppState>,
    Path(vehiculo_id): Path<i64>,
) -> Result<Json<ApiResponse<ChecklistResponse>>, AppError> {
    let controller = ChecklistController::new(state.pool.clone());
    let checklist = controller.get(vehiculo_id).await?;
    Ok(Json(ApiResponse::success(checklist)))
}

async fn list_checklists(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Checklist>>>, AppError> {
    let controller = ChecklistController::new(state.pool.clone());
    let checklists = controller.list().await?;
    Ok(Json(ApiResponse::success(checklists)))
}

async fn update_checklist(
    State(state): State<AppState>,
    Path(vehiculo_id): Path<i64>,
    Json(request): Json<UpdateChecklistRequest>,
) -> Result<Json<ApiResponse<Checklist>>, AppError> {
    let controller = ChecklistController::new(state.pool.clone());
    let response = controller.update(vehiculo_id, request).await?;
    Ok(Json(response))
}

async fn add_damage(
    State(state): State<AppState>,
    Path(vehiculo_id): Path<i64>,
    Json(request): Json<AddDamageRequest>,
) -> Result<Json<ApiResponse<Checklist>>, AppError> {
    let controller = ChecklistController::new(state.pool.clone());
    let response = controller.add_damage(vehiculo_id, request).await?;
    Ok(Json(response))
}

async fn remove_damage(
    State(state): State<AppState>,
    Path((vehiculo_id, dano_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<Checklist>>, AppError> {
    let controller = ChecklistController::new(state.pool.clone());
    let response = controller.remove_damage(vehiculo_id, dano_id).await?;
    Ok(Json(response))
}

async fn delete_checklist(
    State(state): State<AppState>,
    Path(vehiculo_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = ChecklistController::new(state.pool.clone());
    controller.delete(vehiculo_id).await?;
    Ok(Json(ApiResponse::message_only(
        "Checklist eliminado exitosamente".to_string(),
    )))
}
